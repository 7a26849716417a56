use alloc::string::String;

use crate::{
    FieldParser, NmeaSentence, ParseError, SentenceType,
    datetime::Time,
    sentences::faa_mode::FaaMode,
};

/// Data valid
pub const GLL_VALID: &str = "A";
/// Data invalid
pub const GLL_INVALID: &str = "V";

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
///
/// 7. FAA mode indicator, NMEA 2.3 and later
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GllData {
    pub latitude: f64,
    pub longitude: f64,
    pub time: Time,
    /// [`GLL_VALID`] or [`GLL_INVALID`]
    pub validity: String,
    /// Empty before NMEA 2.3
    pub faa_mode: String,
}

impl GllData {
    pub fn mode(&self) -> Option<FaaMode> {
        FaaMode::from_code(&self.faa_mode)
    }
}

/// # Parse GLL message
pub fn parse_gll(sentence: &NmeaSentence) -> Result<GllData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::GLL.as_str());
    let mut data = GllData {
        latitude: p.lat_long(0, 1, "latitude"),
        longitude: p.lat_long(2, 3, "longitude"),
        time: p.time(4, "time"),
        validity: p.enum_string(5, "validity", &[GLL_VALID, GLL_INVALID]),
        faa_mode: String::new(),
    };
    if sentence.fields.len() > 6 {
        data.faa_mode = p.string(6, "FAA mode");
    }
    p.finish(data)
}
