use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// HDT - Heading - True
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_hdt_heading_true>
///
/// ```text
///        1   2 3
///        |   | |
/// $--HDT,x.x,T*hh<CR><LF>
/// ```
/// 1. Heading, degrees True
/// 2. T = True
/// 3. Checksum
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HdtData {
    /// Heading, degrees True
    pub heading: f64,
    /// Heading is relative to true north
    pub true_north: bool,
}

/// # Parse HDT message
///
/// ```text
/// $HEHDT,341.8,T*21
/// ```
pub fn parse_hdt(sentence: &NmeaSentence) -> Result<HdtData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::HDT.as_str());
    let data = HdtData {
        heading: p.float64(0, "heading"),
        true_north: p.enum_string(1, "true", &["T"]) == "T",
    };
    p.finish(data)
}
