//! UTC time of day (`hhmmss.sss`) and date (`ddmmyy`) as carried by sentences.

use core::fmt;

use alloc::string::String;
use chrono::{NaiveDate, NaiveTime};
use nom::{
    IResult, Parser as _,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit0},
    combinator::{eof, map_res, opt},
    sequence::preceded,
};

/// A time of day. `valid` is `false` when the field was empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub valid: bool,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl Time {
    pub const fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Self {
        Self {
            valid: true,
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// `None` when the time is invalid or out of range.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if !self.valid {
            return None;
        }
        NaiveTime::from_hms_milli_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            u32::from(self.millisecond),
        )
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// A calendar date with a two digit year. `valid` is `false` when the field was empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Date {
    pub valid: bool,
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl Date {
    pub const fn new(day: u8, month: u8, year: u8) -> Self {
        Self {
            valid: true,
            day,
            month,
            year,
        }
    }

    /// Expands the two digit year: 83 to 99 are 1983 to 1999, everything else is 20xx.
    pub fn full_year(&self) -> i32 {
        match self.year {
            83..=99 => 1900 + i32::from(self.year),
            _ => 2000 + i32::from(self.year),
        }
    }

    /// `None` when the date is invalid or does not exist.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if !self.valid {
            return None;
        }
        NaiveDate::from_ymd_opt(
            self.full_year(),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:02}", self.day, self.month, self.year)
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    Time(String),
    Date(String),
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::Time(s) => {
                write!(f, "parse time: expected hhmmss.ss format, got '{}'", s)
            }
            DateTimeError::Date(s) => {
                write!(f, "parse date: expected ddmmyy format, got '{}'", s)
            }
        }
    }
}

impl core::error::Error for DateTimeError {}

fn two_digits(i: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), str::parse::<u8>).parse(i)
}

fn do_parse_time(i: &str) -> IResult<&str, (u8, u8, u8, Option<&str>)> {
    let (i, hour) = two_digits(i)?;
    let (i, minute) = two_digits(i)?;
    let (i, second) = two_digits(i)?;
    let (i, fraction) = opt(preceded(char('.'), digit0)).parse(i)?;
    let (i, _) = eof(i)?;
    Ok((i, (hour, minute, second, fraction)))
}

/// Milliseconds of a fraction of seconds given by its decimal digits,
/// rounded half away from zero on the fourth digit.
fn fraction_millis(digits: &str) -> u16 {
    let mut millis = 0;
    let mut digits = digits.bytes().map(|d| u16::from(d - b'0'));
    for _ in 0..3 {
        millis = millis * 10 + digits.next().unwrap_or(0);
    }
    if digits.next().is_some_and(|d| d >= 5) {
        millis += 1;
    }
    millis
}

/// Parses `hhmmss` with an optional fraction of seconds.
///
/// An empty string gives an invalid [`Time`] and no error.
/// Milliseconds are rounded half away from zero.
///
/// # Examples
///
/// ```
/// use nmea0183::datetime::{Time, parse_time};
///
/// assert_eq!(parse_time("220516.1999"), Ok(Time::new(22, 5, 16, 200)));
/// assert!(!parse_time("").unwrap().valid);
/// assert!(parse_time("12345").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<Time, DateTimeError> {
    if s.is_empty() {
        return Ok(Time::default());
    }
    let (_, (hour, minute, second, fraction)) =
        do_parse_time(s).map_err(|_| DateTimeError::Time(s.into()))?;

    Ok(Time::new(
        hour,
        minute,
        second,
        fraction.map_or(0, fraction_millis),
    ))
}

/// Parses `ddmmyy`. An empty string gives an invalid [`Date`] and no error.
pub fn parse_date(s: &str) -> Result<Date, DateTimeError> {
    if s.is_empty() {
        return Ok(Date::default());
    }
    let (_, (day, month, year, _)) = (two_digits, two_digits, two_digits, eof)
        .parse(s)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| DateTimeError::Date(s.into()))?;

    Ok(Date::new(day, month, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    #[test]
    fn time_formats() {
        assert_eq!(parse_time("123456"), Ok(Time::new(12, 34, 56, 0)));
        assert_eq!(parse_time("123456."), Ok(Time::new(12, 34, 56, 0)));
        assert_eq!(parse_time("022732.00"), Ok(Time::new(2, 27, 32, 0)));
        assert_eq!(parse_time("220516.5"), Ok(Time::new(22, 5, 16, 500)));
        assert_eq!(parse_time("235959.9994"), Ok(Time::new(23, 59, 59, 999)));
        assert_eq!(parse_time("000000.0005"), Ok(Time::new(0, 0, 0, 1)));
    }

    #[test]
    fn milliseconds_round_half_away_from_zero() {
        let millis = |s: &str| parse_time(s).unwrap().millisecond;
        assert_eq!(millis("123416"), 0);
        assert_eq!(millis("123416."), 0);
        assert_eq!(millis("123416.5"), 500);
        assert_eq!(millis("123416.05"), 50);
        assert_eq!(millis("123416.045"), 45);
        assert_eq!(millis("123416.0004"), 0);
        assert_eq!(millis("123416.0005"), 1);
        assert_eq!(millis("123416.1995"), 200);
        assert_eq!(millis("123416.9994"), 999);
        assert_eq!(millis("123416.99949999"), 999);
        assert_eq!(parse_time("123416.5").unwrap().second, 16);
    }

    #[test]
    fn empty_time_is_invalid_without_error() {
        let time = parse_time("").unwrap();
        assert!(!time.valid);
        assert_eq!(time.to_naive_time(), None);
    }

    #[test]
    fn bad_times() {
        for bad in ["12345", "1234567", "12:34:56", "1234a6", "123456.1a", "aaaaaa"] {
            assert_eq!(parse_time(bad), Err(DateTimeError::Time(bad.into())), "{bad}");
        }
        assert_eq!(
            parse_time("12345").unwrap_err().to_string(),
            "parse time: expected hhmmss.ss format, got '12345'"
        );
    }

    #[test]
    fn time_display() {
        assert_eq!(Time::new(2, 27, 32, 0).to_string(), "02:27:32.000");
        assert_eq!(Time::new(22, 5, 16, 45).to_string(), "22:05:16.045");
    }

    #[test]
    fn time_to_chrono() {
        assert_eq!(
            Time::new(22, 5, 16, 45).to_naive_time(),
            NaiveTime::from_hms_milli_opt(22, 5, 16, 45)
        );
        assert_eq!(Time::new(25, 0, 0, 0).to_naive_time(), None);
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("230394"), Ok(Date::new(23, 3, 94)));
        assert_eq!(parse_date("010100"), Ok(Date::new(1, 1, 0)));
        assert!(!parse_date("").unwrap().valid);
        for bad in ["23039", "2303944", "23-394", "a30394"] {
            assert_eq!(parse_date(bad), Err(DateTimeError::Date(bad.into())), "{bad}");
        }
    }

    #[test]
    fn date_display_and_chrono() {
        let date = Date::new(23, 3, 94);
        assert_eq!(date.to_string(), "23/03/94");
        assert_eq!(date.full_year(), 1994);
        assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(1994, 3, 23));
        assert_eq!(Date::new(1, 2, 20).to_naive_date(), NaiveDate::from_ymd_opt(2020, 2, 1));
        assert_eq!(Date::new(31, 2, 20).to_naive_date(), None);
        assert_eq!(Date::default().to_naive_date(), None);
    }
}
