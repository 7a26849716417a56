use alloc::string::String;

use heapless::Vec;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// Automatic 2D/3D selection
pub const GSA_AUTO: &str = "A";
/// Manual, forced to operate in 2D or 3D
pub const GSA_MANUAL: &str = "M";

pub const GSA_FIX_NONE: &str = "1";
pub const GSA_FIX_2D: &str = "2";
pub const GSA_FIX_3D: &str = "3";

pub const GSA_SYSTEM_GPS: &str = "1";
pub const GSA_SYSTEM_GLONASS: &str = "2";
pub const GSA_SYSTEM_GALILEO: &str = "3";
pub const GSA_SYSTEM_QZSS: &str = "4";
pub const GSA_SYSTEM_BEIDOU: &str = "5";

/// Number of satellite slots in a GSA sentence
pub const GSA_MAX_SATELLITES: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///        1 2 3                        14 15  16  17  18
///        | | |                         |  |   |   |   |
/// $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// NMEA 4.10 appends the GNSS system id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct GsaData {
    /// [`GSA_AUTO`] or [`GSA_MANUAL`]
    pub mode: String,
    /// One of the `GSA_FIX_*` constants
    pub fix_type: String,
    /// PRNs of the satellites used for the fix, empty slots skipped
    pub sv: Vec<String, GSA_MAX_SATELLITES>,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    /// One of the `GSA_SYSTEM_*` constants, empty when unknown
    pub system_id: String,
}

/// # Parse GSA message
pub fn parse_gsa(sentence: &NmeaSentence) -> Result<GsaData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::GSA.as_str());
    let mut data = GsaData {
        mode: p.enum_string(0, "selection mode", &[GSA_AUTO, GSA_MANUAL]),
        fix_type: p.enum_string(1, "fix type", &[GSA_FIX_NONE, GSA_FIX_2D, GSA_FIX_3D]),
        sv: Vec::new(),
        pdop: 0.,
        hdop: 0.,
        vdop: 0.,
        system_id: String::new(),
    };
    for i in 2..2 + GSA_MAX_SATELLITES {
        let prn = p.string(i, "satellite in view");
        if !prn.is_empty() {
            // at most GSA_MAX_SATELLITES slots
            let _ = data.sv.push(prn);
        }
    }
    data.pdop = p.float64(14, "pdop");
    data.hdop = p.float64(15, "hdop");
    data.vdop = p.float64(16, "vdop");

    match sentence.talker_id() {
        "GN" if sentence.fields.len() > 17 => {
            data.system_id = p.enum_string(
                17,
                "gnss system id",
                &[
                    GSA_SYSTEM_GPS,
                    GSA_SYSTEM_GLONASS,
                    GSA_SYSTEM_GALILEO,
                    GSA_SYSTEM_QZSS,
                    GSA_SYSTEM_BEIDOU,
                ],
            );
        }
        "GP" => data.system_id = GSA_SYSTEM_GPS.into(),
        _ => {}
    }
    p.finish(data)
}
