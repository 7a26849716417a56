use alloc::string::String;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// TXT - Text Transmission
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_txt_text_transmission>
///
/// ```text
///        1  2  3  4
///        |  |  |  |
/// $--TXT,xx,xx,xx,c--c*hh<CR><LF>
/// ```
///
/// 1. Total number of sentences, 01 to 99
/// 2. Sentence number, 01 to 99
/// 3. Text identifier, 01 to 99
/// 4. Text, commas included, may be absent
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtData {
    pub total_number: i64,
    pub number: i64,
    pub id: i64,
    pub message: String,
}

/// # Parse TXT message
pub fn parse_txt(sentence: &NmeaSentence) -> Result<TxtData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::TXT.as_str());
    let data = TxtData {
        total_number: p.int64(0, "total number of sentences"),
        number: p.int64(1, "sentence number"),
        id: p.int64(2, "sentence identifier"),
        message: sentence.fields.get(3..).unwrap_or_default().join(","),
    };
    p.finish(data)
}
