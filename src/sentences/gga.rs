use alloc::string::String;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType, datetime::Time};

/// Invalid fix
pub const FIX_INVALID: &str = "0";
/// GPS fix
pub const FIX_GPS: &str = "1";
/// Differential GPS fix
pub const FIX_DGPS: &str = "2";
/// PPS fix
pub const FIX_PPS: &str = "3";
/// Real Time Kinematic fix
pub const FIX_RTK: &str = "4";
/// Float Real Time Kinematic fix
pub const FIX_FLOAT_RTK: &str = "5";
/// Estimated (dead reckoning) fix
pub const FIX_ESTIMATED: &str = "6";

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                       11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14   15
///         |         |       | |        | | |  |   |   | |   | |   |    |
///  $--GGA,hhmmss.ss,ddmm.mm,a,ddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GgaData {
    pub time: Time,
    pub latitude: f64,
    pub longitude: f64,
    /// One of the `FIX_*` constants
    pub fix_quality: String,
    pub num_satellites: i64,
    pub hdop: f64,
    /// MSL altitude in meters
    pub altitude: f64,
    /// Geoid separation in meters
    pub separation: f64,
    pub dgps_age: String,
    pub dgps_id: String,
}

/// # Parse GGA message
pub fn parse_gga(sentence: &NmeaSentence) -> Result<GgaData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::GGA.as_str());
    let data = GgaData {
        time: p.time(0, "time"),
        latitude: p.lat_long(1, 2, "latitude"),
        longitude: p.lat_long(3, 4, "longitude"),
        fix_quality: p.enum_string(
            5,
            "fix quality",
            &[
                FIX_INVALID,
                FIX_GPS,
                FIX_DGPS,
                FIX_PPS,
                FIX_RTK,
                FIX_FLOAT_RTK,
                FIX_ESTIMATED,
            ],
        ),
        num_satellites: p.int64(6, "number of satellites"),
        hdop: p.float64(7, "hdop"),
        altitude: p.float64(8, "altitude"),
        separation: p.float64(10, "separation"),
        dgps_age: p.string(12, "dgps age"),
        dgps_id: p.string(13, "dgps id"),
    };
    p.finish(data)
}
