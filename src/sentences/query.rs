use alloc::string::String;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// Query sentence, a listener asking a talker for a sentence
///
/// ```text
///        1
///        |
/// $ttllQ,c--c*hh<CR><LF>
/// ```
///
/// `tt` is the requesting talker, `ll` the talker asked for the sentence
/// and field 1 the requested sentence type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryData {
    pub destination_talker_id: String,
    pub requested_sentence: String,
}

/// # Parse a query sentence
pub fn parse_query(sentence: &NmeaSentence) -> Result<QueryData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::Q.as_str());
    let data = QueryData {
        destination_talker_id: sentence.address().get(2..4).unwrap_or_default().into(),
        requested_sentence: p.string(0, "requested sentence"),
    };
    p.finish(data)
}
