use alloc::string::String;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType, sentences::faa_mode::FaaMode};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///         1  2  3  4  5  6  7  8 9
///         |  |  |  |  |  |  |  | |
/// $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq)]
pub struct VtgData {
    /// Course over ground, degrees True
    pub true_track: f64,
    /// Course over ground, degrees Magnetic
    pub magnetic_track: f64,
    pub ground_speed_knots: f64,
    pub ground_speed_kph: f64,
    /// Empty before NMEA 2.3
    pub faa_mode: String,
}

impl VtgData {
    pub fn mode(&self) -> Option<FaaMode> {
        FaaMode::from_code(&self.faa_mode)
    }
}

/// # Parse VTG message
pub fn parse_vtg(sentence: &NmeaSentence) -> Result<VtgData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::VTG.as_str());
    let mut data = VtgData {
        true_track: p.float64(0, "true track"),
        magnetic_track: p.float64(2, "magnetic track"),
        ground_speed_knots: p.float64(4, "ground speed (knots)"),
        ground_speed_kph: p.float64(6, "ground speed (km/h)"),
        faa_mode: String::new(),
    };
    if sentence.fields.len() > 8 {
        data.faa_mode = p.string(8, "FAA mode");
    }
    p.finish(data)
}
