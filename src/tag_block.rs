//! The optional `\key:value,...*hh\` envelope in front of a sentence.
//!
//! <https://rietman.wordpress.com/2016/09/17/nemastudio-now-supports-the-nmea-0183-tag-block/>

use alloc::string::String;

use nom::{
    IResult, Parser as _,
    bytes::complete::{take_till, take_until},
    character::complete::char,
    combinator::rest,
    sequence::{delimited, separated_pair},
};

use crate::{
    error::TagBlockError,
    parse::{CHECKSUM_SEP, checksum, checksum_matches},
};

/// Separator at the start and end of a tag block.
pub const TAG_BLOCK_SEP: char = '\\';

/// Unix timestamp, `c:`
pub const TAG_UNIX_TIME: &str = "c";
/// Destination identification, 15 characters max, `d:`
pub const TAG_DESTINATION: &str = "d";
/// Sentence grouping, `g:`
pub const TAG_GROUPING: &str = "g";
/// Line count, `n:`
pub const TAG_LINE_COUNT: &str = "n";
/// Relative time, `r:`
pub const TAG_RELATIVE_TIME: &str = "r";
/// Source identification, 15 characters max, `s:`
pub const TAG_SOURCE: &str = "s";
/// Text string, `t:`
pub const TAG_TEXT: &str = "t";

/// Largest timestamp still read as seconds by [`TagBlock::unix_seconds`].
const MAX_UNIX_SECONDS: i64 = 99_999_999_999;

/// Metadata carried by a tag block. Absent tags keep their zero value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBlock {
    /// Unix time as sent, seconds or milliseconds depending on the producer.
    pub time: i64,
    pub relative_time: i64,
    pub destination: String,
    pub grouping: String,
    pub line_count: i64,
    pub source: String,
    pub text: String,
}

impl TagBlock {
    /// [`TagBlock::time`] in seconds, treating values too large to be seconds as milliseconds.
    pub fn unix_seconds(&self) -> i64 {
        if self.time > MAX_UNIX_SECONDS {
            self.time / 1000
        } else {
            self.time
        }
    }
}

/// Strips the leading tag block off `line`, returning it with the rest of the line.
pub(crate) fn split_tag_block(line: &str) -> Result<(TagBlock, &str), TagBlockError> {
    let (sentence, inner) = delimited(
        char(TAG_BLOCK_SEP),
        take_till(|c: char| c == TAG_BLOCK_SEP),
        char(TAG_BLOCK_SEP),
    )
    .parse(line)
    .map_err(|_: nom::Err<nom::error::Error<&str>>| TagBlockError::Unterminated)?;

    Ok((parse_tag_block(inner)?, sentence))
}

/// Parses the text between the two `\`, checksum included.
pub fn parse_tag_block(inner: &str) -> Result<TagBlock, TagBlockError> {
    let (fields, found) = inner
        .split_once(CHECKSUM_SEP)
        .ok_or(TagBlockError::ChecksumSeparator)?;

    let calculated = checksum(fields.as_bytes().iter());
    if !checksum_matches(calculated, found) {
        return Err(TagBlockError::ChecksumMismatch {
            calculated,
            found: found.into(),
        });
    }

    let mut tag_block = TagBlock::default();
    for item in fields.split(',').filter(|item| !item.is_empty()) {
        let (_, (key, value)) =
            key_value(item).map_err(|_| TagBlockError::MalformedPair(item.into()))?;
        match key {
            TAG_UNIX_TIME => tag_block.time = parse_tag_number(key, value)?,
            TAG_RELATIVE_TIME => tag_block.relative_time = parse_tag_number(key, value)?,
            TAG_LINE_COUNT => tag_block.line_count = parse_tag_number(key, value)?,
            TAG_DESTINATION => tag_block.destination = value.into(),
            TAG_GROUPING => tag_block.grouping = value.into(),
            TAG_SOURCE => tag_block.source = value.into(),
            TAG_TEXT => tag_block.text = value.into(),
            // unknown tags are skipped
            _ => {}
        }
    }

    Ok(tag_block)
}

fn key_value(i: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(take_until(":"), char(':'), rest).parse(i)
}

fn parse_tag_number(key: &str, value: &str) -> Result<i64, TagBlockError> {
    value
        .parse::<i64>()
        .map_err(|_| TagBlockError::InvalidValue {
            key: key.chars().next().unwrap_or_default(),
            value: value.into(),
        })
}
