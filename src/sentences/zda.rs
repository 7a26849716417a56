use chrono::{NaiveDate, NaiveDateTime};

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType, datetime::Time};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///        1         2  3  4    5  6  7
///        |         |  |  |    |  |  |
/// $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// 1. UTC time (hours, minutes, seconds, may have fractional subseconds)
/// 2. Day, 01 to 31
/// 3. Month, 01 to 12
/// 4. Year (4 digits)
/// 5. Local zone description, 00 to +- 13 hours
/// 6. Local zone minutes description, 00 to 59, apply same sign as local hours
/// 7. Checksum
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZdaData {
    pub time: Time,
    pub day: i64,
    pub month: i64,
    pub year: i64,
    /// Local time zone offset from GMT, hours
    pub offset_hours: i64,
    /// Local time zone offset from GMT, minutes
    pub offset_minutes: i64,
}

impl ZdaData {
    /// The UTC date and time, `None` when a part is missing or out of range.
    pub fn utc_date_time(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            i32::try_from(self.year).ok()?,
            u32::try_from(self.month).ok()?,
            u32::try_from(self.day).ok()?,
        )?;
        Some(date.and_time(self.time.to_naive_time()?))
    }
}

/// # Parse ZDA message
pub fn parse_zda(sentence: &NmeaSentence) -> Result<ZdaData, ParseError> {
    let mut p = FieldParser::new(sentence);
    p.assert_type(SentenceType::ZDA.as_str());
    let data = ZdaData {
        time: p.time(0, "time"),
        day: p.int64(1, "day"),
        month: p.int64(2, "month"),
        year: p.int64(3, "year"),
        offset_hours: p.int64(4, "offset (hours)"),
        offset_minutes: p.int64(5, "offset (minutes)"),
    };
    p.finish(data)
}
