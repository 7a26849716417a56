//! The [`FieldParser`], a typed cursor over the fields of one sentence.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    NmeaSentence,
    armor::decode_six_bit_ascii,
    coordinate::{CoordinateError, EAST, NORTH, SOUTH, WEST, gps_to_degrees},
    datetime::{Date, Time, parse_date, parse_time},
    error::{FieldError, ParseError},
};

/// Pulls typed values out of [`NmeaSentence::fields`].
///
/// Errors do not stop decoding: every getter attempts its own field,
/// records a [`FieldError`] on failure and returns the zero value of its
/// type. [`FieldParser::finish`] then reports every error at once, in the
/// order the fields were read.
///
/// # Examples
///
/// ```
/// use nmea0183::{FieldParser, parse_nmea_sentence};
///
/// let sentence = parse_nmea_sentence("$GPHDT,274.07,T*03").unwrap();
/// let mut p = FieldParser::new(&sentence);
/// p.assert_type("HDT");
/// let heading = p.float64(0, "heading");
/// let true_ = p.enum_string(1, "true", &["T"]) == "T";
/// let (heading, true_) = p.finish((heading, true_)).unwrap();
/// assert_eq!(heading, 274.07);
/// assert!(true_);
/// ```
#[derive(Debug)]
pub struct FieldParser<'a> {
    sentence: &'a NmeaSentence,
    prefix: String,
    errors: Vec<FieldError>,
}

impl<'a> FieldParser<'a> {
    pub fn new(sentence: &'a NmeaSentence) -> Self {
        Self {
            sentence,
            prefix: sentence.prefix(),
            errors: Vec::new(),
        }
    }

    pub fn sentence(&self) -> &'a NmeaSentence {
        self.sentence
    }

    /// Talker and type, the prefix of every recorded error.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Records a `type` error unless the sentence type is `sentence_type`.
    pub fn assert_type(&mut self, sentence_type: &str) {
        if self.sentence.sentence_type != sentence_type {
            let found = self.sentence.sentence_type.clone();
            self.set_err("type", &found);
        }
    }

    /// Records an error against `context`.
    pub fn set_err(&mut self, context: &str, value: &str) {
        self.errors
            .push(FieldError::new(&self.prefix, context, value));
    }

    fn field(&mut self, i: usize, context: &str) -> Option<&'a str> {
        let field = self.sentence.fields.get(i).map(String::as_str);
        if field.is_none() {
            self.errors
                .push(FieldError::missing(&self.prefix, context, i));
        }
        field
    }

    /// Field `i` as is.
    pub fn string(&mut self, i: usize, context: &str) -> String {
        self.field(i, context).unwrap_or_default().into()
    }

    /// Every field from `from` onwards.
    pub fn list_string(&mut self, from: usize, context: &str) -> Vec<String> {
        match self.sentence.fields.get(from..) {
            Some(fields) if from < self.sentence.fields.len() => fields.to_vec(),
            _ => {
                self.errors
                    .push(FieldError::missing(&self.prefix, context, from));
                Vec::new()
            }
        }
    }

    /// Field `i`, which must be one of `options` when not empty.
    pub fn enum_string(&mut self, i: usize, context: &str, options: &[&str]) -> String {
        let Some(s) = self.field(i, context) else {
            return String::new();
        };
        if s.is_empty() || options.contains(&s) {
            return s.into();
        }
        self.set_err(context, s);
        String::new()
    }

    /// Field `i` read as a run of one character codes, each one of `options`.
    pub fn enum_chars(&mut self, i: usize, context: &str, options: &[&str]) -> Vec<String> {
        let Some(s) = self.field(i, context) else {
            return Vec::new();
        };
        let mut codes = Vec::with_capacity(s.len());
        for c in s.chars() {
            let mut buf = [0; 4];
            let code: &str = c.encode_utf8(&mut buf);
            if !options.contains(&code) {
                self.set_err(context, s);
                return Vec::new();
            }
            codes.push(code.to_string());
        }
        codes
    }

    fn number<T>(
        &mut self,
        i: usize,
        context: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let s = self.field(i, context)?;
        if s.is_empty() {
            return None;
        }
        let value = parse(s);
        if value.is_none() {
            self.set_err(context, s);
        }
        value
    }

    /// Decimal integer, `0` when empty.
    pub fn int64(&mut self, i: usize, context: &str) -> i64 {
        self.null_int64(i, context).unwrap_or_default()
    }

    /// Hexadecimal integer, `0` when empty.
    pub fn hex_int64(&mut self, i: usize, context: &str) -> i64 {
        self.number(i, context, |s| i64::from_str_radix(s, 16).ok())
            .unwrap_or_default()
    }

    /// Decimal integer, `None` when empty.
    pub fn null_int64(&mut self, i: usize, context: &str) -> Option<i64> {
        self.number(i, context, |s| s.parse::<i64>().ok())
    }

    /// Floating point number, `0.0` when empty.
    pub fn float64(&mut self, i: usize, context: &str) -> f64 {
        self.null_float64(i, context).unwrap_or_default()
    }

    /// Floating point number, `None` when empty.
    pub fn null_float64(&mut self, i: usize, context: &str) -> Option<f64> {
        self.number(i, context, |s| s.parse::<f64>().ok())
    }

    /// `hhmmss.sss`, an invalid [`Time`] when empty.
    pub fn time(&mut self, i: usize, context: &str) -> Time {
        let Some(s) = self.field(i, context) else {
            return Time::default();
        };
        parse_time(s).unwrap_or_else(|_| {
            self.set_err(context, s);
            Time::default()
        })
    }

    /// `ddmmyy`, an invalid [`Date`] when empty.
    pub fn date(&mut self, i: usize, context: &str) -> Date {
        let Some(s) = self.field(i, context) else {
            return Date::default();
        };
        parse_date(s).unwrap_or_else(|_| {
            self.set_err(context, s);
            Date::default()
        })
    }

    /// Signed decimal degrees from a `ddmm.mmmm` field `i` and its
    /// hemisphere field `j`. Both empty is `0.0`.
    pub fn lat_long(&mut self, i: usize, j: usize, context: &str) -> f64 {
        let value = self.field(i, context);
        let dir = self.field(j, context);
        let (Some(value), Some(dir)) = (value, dir) else {
            return 0.;
        };
        if value.is_empty() && dir.is_empty() {
            return 0.;
        }

        let result = gps_to_degrees(value, dir).and_then(|degrees| match dir {
            NORTH | SOUTH if !(-90. ..=90.).contains(&degrees) => {
                Err(CoordinateError::LatitudeRange)
            }
            EAST | WEST if !(-180. ..=180.).contains(&degrees) => {
                Err(CoordinateError::LongitudeRange)
            }
            _ => Ok(degrees),
        });
        match result {
            Ok(degrees) => degrees,
            Err(e) => {
                self.set_err(context, &e.to_string());
                0.
            }
        }
    }

    /// Unpacks the six-bit armored payload in field `i`, one element per bit.
    pub fn six_bit_ascii_armour(&mut self, i: usize, fill_bits: i64, context: &str) -> Vec<u8> {
        let Some(payload) = self.field(i, context) else {
            return Vec::new();
        };
        decode_six_bit_ascii(payload, fill_bits).unwrap_or_else(|e| {
            self.errors
                .push(FieldError::armor(&self.prefix, context, e));
            Vec::new()
        })
    }

    /// `value` when no error was recorded, every error otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, ParseError> {
        match ParseError::from_errors(self.errors) {
            None => Ok(value),
            Some(errors) => Err(errors),
        }
    }
}
