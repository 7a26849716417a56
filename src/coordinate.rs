//! Latitude / longitude in their textual forms.
//!
//! - DMS, e.g. `33° 23' 22"`
//! - GPS/NMEA, e.g. `15113.4322 S`, degrees × 100 + minutes and a hemisphere
//! - Decimal degrees, e.g. `-33.23454`

use alloc::{format, string::String};
use core::fmt;

use nom::{
    IResult, Parser as _,
    character::complete::{char, digit1, space0},
    combinator::{eof, map_res, opt},
    number::complete::double,
    sequence::{preceded, terminated},
};
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore;

pub const DEGREES: char = '\u{00B0}';
pub const MINUTES: char = '\'';
pub const SECONDS: char = '"';

pub const NORTH: &str = "N";
pub const SOUTH: &str = "S";
pub const EAST: &str = "E";
pub const WEST: &str = "W";

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// None of the supported forms matched.
    UnknownFormat(String),
    /// The hemisphere is not one of `N`, `S`, `E`, `W`.
    Direction(String),
    /// The numeric part is not a number.
    Number(String),
    LatitudeRange,
    LongitudeRange,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::UnknownFormat(s) => write!(f, "cannot parse [{}], unknown format", s),
            CoordinateError::Direction(d) => write!(f, "invalid direction [{}]", d),
            CoordinateError::Number(s) => write!(f, "parse error [{}]", s),
            CoordinateError::LatitudeRange => write!(f, "latitude is not in range (-90, 90)"),
            CoordinateError::LongitudeRange => {
                write!(f, "longitude is not in range (-180, 180)")
            }
        }
    }
}

impl core::error::Error for CoordinateError {}

/// Parses a coordinate of unknown form, trying DMS, then GPS, then decimal degrees.
///
/// # Examples
///
/// ```
/// use nmea0183::coordinate::parse_lat_long;
///
/// let gps = parse_lat_long("5133.82 N").unwrap();
/// let dms = parse_lat_long("51° 33' 49.2\"").unwrap();
/// let decimal = parse_lat_long("51.563667").unwrap();
/// assert!((gps - dms).abs() < 1e-3 && (dms - decimal).abs() < 1e-3);
/// ```
pub fn parse_lat_long(s: &str) -> Result<f64, CoordinateError> {
    parse_dms(s)
        .or_else(|_| parse_gps(s))
        .or_else(|_| parse_decimal(s))
        .map_err(|_| CoordinateError::UnknownFormat(s.into()))
}

/// Parses the `<ddmm.mmmm> <hemisphere>` form used inside sentences.
pub fn parse_gps(s: &str) -> Result<f64, CoordinateError> {
    let (value, dir) = s
        .split_once(' ')
        .filter(|(_, dir)| !dir.contains(' '))
        .ok_or_else(|| CoordinateError::UnknownFormat(s.into()))?;
    gps_to_degrees(value, dir)
}

/// Converts a `ddmm.mmmm` value and its hemisphere letter to signed decimal degrees.
pub fn gps_to_degrees(value: &str, dir: &str) -> Result<f64, CoordinateError> {
    let value = value
        .parse::<f64>()
        .map_err(|_| CoordinateError::Number(value.into()))?;

    let degrees = (value / 100.).floor();
    let minutes = value - degrees * 100.;
    let value = degrees + minutes / 60.;

    match dir {
        NORTH | EAST => Ok(value),
        SOUTH | WEST => Ok(-value),
        _ => Err(CoordinateError::Direction(dir.into())),
    }
}

/// Parses signed decimal degrees.
///
/// More than three integer digits without a sign looks like the GPS form
/// and is rejected.
pub fn parse_decimal(s: &str) -> Result<f64, CoordinateError> {
    let value = s
        .parse::<f64>()
        .map_err(|_| CoordinateError::Number(s.into()))?;
    let integer_digits = s.split('.').next().unwrap_or_default().len();
    if !s.starts_with('-') && integer_digits > 3 {
        return Err(CoordinateError::UnknownFormat(s.into()));
    }
    Ok(value)
}

fn number(i: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>).parse(i)
}

fn do_parse_dms(i: &str) -> IResult<&str, f64> {
    let (i, degrees) = preceded(space0, terminated(number, (space0, char(DEGREES)))).parse(i)?;
    let (i, minutes) =
        opt(preceded(space0, terminated(number, (space0, char(MINUTES))))).parse(i)?;
    let (i, seconds) =
        opt(preceded(space0, terminated(double, (space0, char(SECONDS))))).parse(i)?;
    let (i, _) = (space0, eof).parse(i)?;

    Ok((
        i,
        f64::from(degrees)
            + f64::from(minutes.unwrap_or(0)) / 60.
            + seconds.unwrap_or(0.) / 3600.,
    ))
}

/// Parses degrees, minutes and seconds, e.g. `33° 23' 22"`.
pub fn parse_dms(s: &str) -> Result<f64, CoordinateError> {
    do_parse_dms(s)
        .map(|(_, value)| value)
        .map_err(|_| CoordinateError::UnknownFormat(s.into()))
}

/// Formats a coordinate in the GPS form, without the hemisphere.
pub fn format_gps(l: f64) -> String {
    let degrees = l.abs().floor();
    let minutes = (l.abs() - degrees) * 60.;
    let padding = if minutes < 10. { "0" } else { "" };
    format!("{}{}{:.4}", degrees as u32, padding, minutes)
}

/// Formats a coordinate as degrees, minutes and seconds, without the hemisphere.
pub fn format_dms(l: f64) -> String {
    let value = l.abs();
    let degrees = value.floor();
    let minutes = (60. * (value - degrees)).floor();
    let seconds = 3600. * (value - degrees - minutes / 60.);
    format!(
        "{}{} {}{} {:.6}{}",
        degrees as u32, DEGREES, minutes as u32, MINUTES, seconds, SECONDS
    )
}

/// Hemisphere letter of a latitude.
pub fn lat_dir(l: f64) -> &'static str {
    if l < 0. { SOUTH } else { NORTH }
}

/// Hemisphere letter of a longitude.
pub fn lon_dir(l: f64) -> &'static str {
    if l < 0. { WEST } else { EAST }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gps_form() {
        assert_relative_eq!(parse_gps("3926.7952 N").unwrap(), 39. + 26.7952 / 60.);
        assert_relative_eq!(parse_gps("12000.5947 W").unwrap(), -(120. + 0.5947 / 60.));
        assert_relative_eq!(parse_gps("15113.4322 S").unwrap(), -(151. + 13.4322 / 60.));
        assert_eq!(
            parse_gps("3926.7952 X"),
            Err(CoordinateError::Direction("X".into()))
        );
        assert!(parse_gps("3926.7952N").is_err());
        assert!(parse_gps("abc N").is_err());
    }

    #[test]
    fn dms_form() {
        assert_relative_eq!(parse_dms("33° 23' 22\"").unwrap(), 33. + 23. / 60. + 22. / 3600.);
        assert_relative_eq!(parse_dms("33°23'").unwrap(), 33. + 23. / 60.);
        assert_relative_eq!(parse_dms("151°").unwrap(), 151.);
        assert!(parse_dms("33 23' 22\"").is_err());
        assert!(parse_dms("33° 23' 22\" N").is_err());
    }

    #[test]
    fn decimal_form() {
        assert_relative_eq!(parse_decimal("151.196019").unwrap(), 151.196019);
        assert_relative_eq!(parse_decimal("-33.23454").unwrap(), -33.23454);
        assert!(parse_decimal("1511.96019").is_err());
        assert!(parse_decimal("x").is_err());
    }

    #[test]
    fn same_latitude_in_every_form() {
        let gps = parse_lat_long("5133.82 N").unwrap();
        let dms = parse_lat_long("51° 33' 49.2\"").unwrap();
        let decimal = parse_lat_long("51.563667").unwrap();
        assert_relative_eq!(gps, dms, epsilon = 1e-3);
        assert_relative_eq!(dms, decimal, epsilon = 1e-3);
        assert_relative_eq!(gps, 51.563667, epsilon = 1e-3);
    }

    #[test]
    fn unknown_form() {
        assert_eq!(
            parse_lat_long("hello"),
            Err(CoordinateError::UnknownFormat("hello".into()))
        );
    }

    #[test]
    fn formatting() {
        assert_eq!(format_gps(51.563667), "5133.8200");
        assert_eq!(format_gps(-120.5), "12030.0000");
        assert_eq!(format_gps(39.1), "3906.0000");
        assert_eq!(format_dms(33.389444), "33° 23' 21.998400\"");
        assert_eq!(lat_dir(-1.), SOUTH);
        assert_eq!(lat_dir(1.), NORTH);
        assert_eq!(lon_dir(-1.), WEST);
        assert_eq!(lon_dir(1.), EAST);
    }
}
