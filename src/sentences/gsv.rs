use heapless::Vec;

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// Satellites described by one GSV sentence
pub const GSV_MAX_SATELLITES: usize = 4;

/// GSV - Satellites in view
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///        1 2 3 4 5 6 7     n
///        | | | | | | |     |
/// $--GSV,x,x,x,x,x,x,x,...*hh<CR><LF>
/// ```
///
/// 1. total number of GSV sentences to be transmitted in this group
/// 2. Sentence number, 1-9 of this GSV message within current group
/// 3. total number of satellites in view (leading zeros sent)
/// 4. satellite ID or PRN number (leading zeros sent)
/// 5. elevation in degrees (-90 to 90) (leading zeros sent)
/// 6. azimuth in degrees to true north (000 to 359) (leading zeros sent)
/// 7. SNR in dB (00-99) (leading zeros sent)
///    more satellite info quadruples like 4-7
///    n) checksum
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsvData {
    pub total_messages: i64,
    pub message_number: i64,
    pub number_svs_in_view: i64,
    pub info: Vec<GsvInfo, GSV_MAX_SATELLITES>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GsvInfo {
    /// Pseudo-random noise or gold code
    pub prn: i64,
    /// Elevation in degrees, 90 maximum
    pub elevation: i64,
    /// Azimuth, degrees from true north, 000 to 359
    pub azimuth: i64,
    /// 00-99 dB, `0` when not tracking
    pub snr: i64,
}

/// # Parse GSV message
pub fn parse_gsv(sentence: &NmeaSentence) -> Result<GsvData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::GSV.as_str());
    let mut data = GsvData {
        total_messages: p.int64(0, "total number of messages"),
        message_number: p.int64(1, "message number"),
        number_svs_in_view: p.int64(2, "number of SVs in view"),
        info: Vec::new(),
    };
    for i in 0..GSV_MAX_SATELLITES {
        // a trailing signal id is not a satellite
        if 5 * i + 4 > sentence.fields.len() {
            break;
        }
        let info = GsvInfo {
            prn: p.int64(3 + i * 4, "SV prn number"),
            elevation: p.int64(4 + i * 4, "elevation"),
            azimuth: p.int64(5 + i * 4, "azimuth"),
            snr: p.int64(6 + i * 4, "SNR"),
        };
        let _ = data.info.push(info);
    }
    p.finish(data)
}
