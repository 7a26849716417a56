use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write as _};

use arrayvec::ArrayString;
use nom::{
    IResult, Parser as _,
    bytes::complete::take_until,
    character::complete::{char, one_of},
    combinator::rest,
};

use crate::{
    Error,
    tag_block::{TAG_BLOCK_SEP, TagBlock, split_tag_block},
};

/// Start of a conventional sentence.
pub const SENTENCE_START: char = '$';
/// Start of an encapsulation sentence carrying a binary payload (AIS).
pub const SENTENCE_START_ENCAPSULATED: char = '!';
/// Delimits the fields of a sentence.
pub const FIELD_SEP: char = ',';
/// Delimits the checksum of a sentence.
pub const CHECKSUM_SEP: char = '*';
/// First character of a proprietary address field.
pub const PROPRIETARY_PREFIX: char = 'P';
/// Last character of a query address field.
pub const QUERY_SUFFIX: char = 'Q';

/// One tokenized line: address, fields and checksum, with its optional tag block.
///
/// `fields` excludes the address field and the checksum and keeps empty
/// fields in place, their position is what gives them meaning.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmeaSentence {
    /// Two letter source, empty for proprietary sentences.
    #[cfg_attr(feature = "defmt", defmt(Debug2Format))]
    pub talker_id: ArrayString<2>,
    /// The sentence type, e.g. `GGA`; the whole address for proprietary sentences.
    pub sentence_type: String,
    pub fields: Vec<String>,
    /// As received, upper cased. Empty without a `*`.
    pub checksum: String,
    /// The sentence text, trimmed and without its tag block.
    pub raw: String,
    pub tag_block: Option<TagBlock>,
    address: String,
}

impl NmeaSentence {
    /// Talker and type, as used to attribute errors, e.g. `GPGLL`.
    pub fn prefix(&self) -> String {
        let mut prefix = String::with_capacity(self.talker_id.len() + self.sentence_type.len());
        prefix.push_str(&self.talker_id);
        prefix.push_str(&self.sentence_type);
        prefix
    }

    pub fn talker_id(&self) -> &str {
        &self.talker_id
    }

    pub fn data_type(&self) -> &str {
        &self.sentence_type
    }

    /// The first field of the sentence as received, e.g. `GPGLL` or `CCGPQ`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// `true` when the sentence started with `!`.
    pub fn is_encapsulated(&self) -> bool {
        self.raw.starts_with(SENTENCE_START_ENCAPSULATED)
    }

    /// `$` or `!`.
    pub fn start_token(&self) -> char {
        if self.is_encapsulated() {
            SENTENCE_START_ENCAPSULATED
        } else {
            SENTENCE_START
        }
    }

    /// Checksum of the address and the fields.
    pub fn calc_checksum(&self) -> u8 {
        let separator = [FIELD_SEP as u8];
        let mut acc = checksum(self.address.as_bytes().iter());
        for field in &self.fields {
            acc ^= checksum(separator.iter().chain(field.as_bytes()));
        }
        acc
    }
}

impl fmt::Display for NmeaSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// XOR of all the bytes.
pub fn checksum<'a, I: Iterator<Item = &'a u8>>(bytes: I) -> u8 {
    bytes.fold(0, |c, x| c ^ *x)
}

/// Two digit upper case hex form of a checksum.
pub fn checksum_hex(checksum: u8) -> ArrayString<2> {
    let mut hex = ArrayString::new();
    // two hex digits always fit
    let _ = write!(hex, "{:02X}", checksum);
    hex
}

pub(crate) fn checksum_matches(calculated: u8, found: &str) -> bool {
    checksum_hex(calculated).eq_ignore_ascii_case(found)
}

fn parse_start(i: &str) -> IResult<&str, char> {
    one_of("$!").parse(i)
}

fn split_checksum(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, payload) = take_until("*").parse(i)?;
    let (i, _) = char(CHECKSUM_SEP).parse(i)?;
    let (i, found) = rest.parse(i)?;
    Ok((i, (payload, found)))
}

/// Splits an address field into talker id and sentence type.
///
/// A proprietary address (`P...`) has no talker id and is its own sentence
/// type. Anything else needs a two letter talker id and a type of at least
/// three letters; `ttllQ` is a query with type `Q`.
pub fn parse_address(address: &str) -> Result<(ArrayString<2>, String), Error> {
    let invalid = || Error::InvalidAddress(address.into());
    if !address.is_ascii() {
        return Err(invalid());
    }
    if address.starts_with(PROPRIETARY_PREFIX) {
        return Ok((ArrayString::new(), address.into()));
    }
    // talker id (2) + sentence type (3+)
    if address.len() < 5 {
        return Err(invalid());
    }
    let talker_id = ArrayString::from(&address[..2]).map_err(|_| invalid())?;
    // XXYYQ: the requester, the requestee and the query marker
    if address.len() == 5 && address.ends_with(QUERY_SUFFIX) {
        return Ok((talker_id, QUERY_SUFFIX.to_string()));
    }
    Ok((talker_id, address[2..].into()))
}

/// Verifies the received checksum against the XOR of `payload`, the text
/// between the start token and the `*`.
pub fn verify_checksum(sentence: &NmeaSentence, payload: &str) -> Result<(), Error> {
    if sentence.checksum.is_empty() {
        return Err(Error::ChecksumSeparator);
    }
    let calculated = checksum(payload.as_bytes().iter());
    if !checksum_matches(calculated, &sentence.checksum) {
        return Err(Error::ChecksumMismatch {
            calculated,
            found: sentence.checksum.clone(),
        });
    }
    Ok(())
}

/// Splits an address field into talker id and sentence type.
pub type AddressParser = dyn Fn(&str) -> Result<(ArrayString<2>, String), Error> + Send + Sync;
/// Accepts or rejects a tokenized sentence given its checksummed payload.
pub type ChecksumCheck = dyn Fn(&NmeaSentence, &str) -> Result<(), Error> + Send + Sync;
/// Receives every tag block, including those of lines failing later on.
pub type TagBlockHook = dyn Fn(&TagBlock) + Send + Sync;

/// Tokenizer with replaceable address splitting and checksum verification
/// and a hook for tag blocks.
///
/// Without any hook it behaves as [`parse_nmea_sentence`], which uses
/// [`parse_address`] and [`verify_checksum`].
///
/// # Examples
///
/// Accepting sentences with a missing or wrong checksum:
///
/// ```
/// use nmea0183::SentenceParser;
///
/// let parser = SentenceParser::new().with_checksum_check(|_, _| Ok(()));
/// let sentence = parser.parse("$GPHDT,274.07,T").unwrap();
/// assert_eq!(sentence.fields, ["274.07", "T"]);
/// assert_eq!(sentence.checksum, "");
/// ```
#[derive(Default)]
pub struct SentenceParser {
    address_parser: Option<Box<AddressParser>>,
    checksum_check: Option<Box<ChecksumCheck>>,
    tag_block_hook: Option<Box<TagBlockHook>>,
}

impl SentenceParser {
    pub const fn new() -> Self {
        Self {
            address_parser: None,
            checksum_check: None,
            tag_block_hook: None,
        }
    }

    /// Replaces [`parse_address`].
    pub fn with_address_parser<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<(ArrayString<2>, String), Error> + Send + Sync + 'static,
    {
        self.address_parser = Some(Box::new(f));
        self
    }

    /// Replaces [`verify_checksum`]. The check is also in charge of sentences
    /// without a `*`, their checksum is empty.
    pub fn with_checksum_check<F>(mut self, f: F) -> Self
    where
        F: Fn(&NmeaSentence, &str) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.checksum_check = Some(Box::new(f));
        self
    }

    /// Calls `f` with every valid tag block, before the sentence behind it
    /// is looked at. Lines of a multi-line group can be joined from there.
    pub fn with_tag_block_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(&TagBlock) + Send + Sync + 'static,
    {
        self.tag_block_hook = Some(Box::new(f));
        self
    }

    /// Tokenizes one line into a [`NmeaSentence`].
    pub fn parse(&self, line: &str) -> Result<NmeaSentence, Error> {
        let line = line.trim();

        let (tag_block, line) = if line.starts_with(TAG_BLOCK_SEP) {
            let (tag_block, rest) = split_tag_block(line)?;
            if let Some(hook) = &self.tag_block_hook {
                hook(&tag_block);
            }
            (Some(tag_block), rest)
        } else {
            (None, line)
        };

        let (body, _) = parse_start(line).map_err(|_| Error::MissingStartToken)?;
        let (payload, found) = match body.matches(CHECKSUM_SEP).count() {
            0 => (body, ""),
            1 => split_checksum(body)
                .map(|(_, split)| split)
                .map_err(|_| Error::ChecksumSeparator)?,
            _ => return Err(Error::ChecksumSeparator),
        };

        let mut tokens = payload.split(FIELD_SEP);
        let address = tokens.next().unwrap_or_default();
        let (talker_id, sentence_type) = match &self.address_parser {
            Some(address_parser) => address_parser(address)?,
            None => parse_address(address)?,
        };

        let sentence = NmeaSentence {
            talker_id,
            sentence_type,
            fields: tokens.map(String::from).collect(),
            checksum: found.to_ascii_uppercase(),
            raw: line.into(),
            tag_block,
            address: address.into(),
        };
        match &self.checksum_check {
            Some(checksum_check) => checksum_check(&sentence, payload)?,
            None => verify_checksum(&sentence, payload)?,
        }
        Ok(sentence)
    }
}

impl fmt::Debug for SentenceParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceParser")
            .field("address_parser", &self.address_parser.is_some())
            .field("checksum_check", &self.checksum_check.is_some())
            .field("tag_block_hook", &self.tag_block_hook.is_some())
            .finish()
    }
}

/// Tokenizes one line into a [`NmeaSentence`], verifying the checksums.
///
/// Surrounding whitespace (e.g. `\r\n`) is ignored. A leading `\...\` tag
/// block is parsed and validated on its own before the sentence itself.
///
/// # Examples
///
/// ```
/// let sentence = nmea0183::parse_nmea_sentence("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58").unwrap();
/// assert_eq!(sentence.talker_id(), "GP");
/// assert_eq!(sentence.data_type(), "GLL");
/// assert_eq!(sentence.fields.len(), 7);
/// ```
pub fn parse_nmea_sentence(line: &str) -> Result<NmeaSentence, Error> {
    SentenceParser::new().parse(line)
}
