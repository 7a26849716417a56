use alloc::string::String;

use crate::{
    FieldParser, NmeaSentence, ParseError, SentenceType,
    coordinate::{EAST, WEST},
    datetime::{Date, Time},
    sentences::faa_mode::{FaaMode, NAV_STATUSES},
};

/// Data valid
pub const RMC_VALID: &str = "A";
/// Data invalid, navigation receiver warning
pub const RMC_INVALID: &str = "V";

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                           12
///         1         2 3       4 5        6  7   8   9    10 11|  13
///         |         | |       | |        |  |   |   |    |  | |   |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m,s*hh<CR><LF>
/// ```
///
/// 12. FAA mode indicator, NMEA 2.3 and later
/// 13. Navigation status, NMEA 4.1 and later
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct RmcData {
    pub time: Time,
    /// [`RMC_VALID`] or [`RMC_INVALID`]
    pub validity: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Speed over ground in knots
    pub speed: f64,
    /// Track made good, degrees true
    pub course: f64,
    pub date: Date,
    /// Magnetic variation in degrees, negative when West
    pub variation: f64,
    /// Not checked against the standard codes, some devices send their own
    pub faa_mode: String,
    /// One of the `NAV_STATUS_*` constants, empty before NMEA 4.1
    pub nav_status: String,
}

impl RmcData {
    pub fn mode(&self) -> Option<FaaMode> {
        FaaMode::from_code(&self.faa_mode)
    }
}

/// # Parse RMC message
pub fn parse_rmc(sentence: &NmeaSentence) -> Result<RmcData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::RMC.as_str());
    let mut data = RmcData {
        time: p.time(0, "time"),
        validity: p.enum_string(1, "validity", &[RMC_VALID, RMC_INVALID]),
        latitude: p.lat_long(2, 3, "latitude"),
        longitude: p.lat_long(4, 5, "longitude"),
        speed: p.float64(6, "speed"),
        course: p.float64(7, "course"),
        date: p.date(8, "date"),
        variation: p.float64(9, "variation"),
        faa_mode: String::new(),
        nav_status: String::new(),
    };
    if p.enum_string(10, "direction", &[WEST, EAST]) == WEST {
        data.variation = -data.variation;
    }
    if sentence.fields.len() > 11 {
        data.faa_mode = p.string(11, "FAA mode");
    }
    if sentence.fields.len() > 12 {
        data.nav_status = p.enum_string(12, "navigation status", &NAV_STATUSES);
    }
    p.finish(data)
}
