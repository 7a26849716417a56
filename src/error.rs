use alloc::{string::String, vec::Vec};
use core::fmt;

/// Failure of the six-bit ASCII armor codec.
///
/// These originate below the per-field abstraction, so they stay a
/// distinct kind even after being wrapped into a [`FieldError`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorError {
    /// A payload character outside of the armor alphabet.
    DataByte(u8),
    /// Fill bits outside of `0..=5`.
    FillBits(i64),
    /// More fill bits than payload bits.
    NumBits,
}

impl ArmorError {
    /// Short reason used as the offending value in a [`FieldError`].
    pub fn reason(&self) -> &'static str {
        match self {
            ArmorError::DataByte(_) => "data byte",
            ArmorError::FillBits(_) => "fill bits",
            ArmorError::NumBits => "num bits",
        }
    }
}

impl fmt::Display for ArmorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid payload: {}", self.reason())
    }
}

impl core::error::Error for ArmorError {}

/// What went wrong with a single field.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field index is past the end of the sentence, the value is the index.
    Missing,
    /// The field is present but its text is not acceptable.
    Invalid,
    /// The six-bit armored payload could not be unpacked.
    Armor(ArmorError),
}

/// A single bad field, attributed to the sentence prefix (talker + type)
/// and to a human readable context such as `"latitude"`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub prefix: String,
    pub context: String,
    pub value: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(prefix: &str, context: &str, value: &str) -> Self {
        Self {
            prefix: prefix.into(),
            context: context.into(),
            value: value.into(),
            kind: FieldErrorKind::Invalid,
        }
    }

    pub fn missing(prefix: &str, context: &str, index: usize) -> Self {
        Self {
            prefix: prefix.into(),
            context: context.into(),
            value: alloc::format!("{}", index),
            kind: FieldErrorKind::Missing,
        }
    }

    pub fn armor(prefix: &str, context: &str, error: ArmorError) -> Self {
        Self {
            prefix: prefix.into(),
            context: context.into(),
            value: error.reason().into(),
            kind: FieldErrorKind::Armor(error),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.kind == FieldErrorKind::Missing
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid {}: {}", self.prefix, self.context, self.value)
    }
}

impl core::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            FieldErrorKind::Armor(error) => Some(error),
            _ => None,
        }
    }
}

/// All the field errors collected while decoding one sentence, in field order.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    errors: Vec<FieldError>,
}

impl ParseError {
    /// Returns `None` when there is nothing to report.
    pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn iter(&self) -> core::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Structural lookup of a nested field error by prefix, context and value.
    pub fn contains(&self, error: &FieldError) -> bool {
        self.errors.iter().any(|e| {
            e.prefix == error.prefix && e.context == error.context && e.value == error.value
        })
    }

    /// First field error with the given context, if any.
    pub fn find(&self, context: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.context == context)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ParseError {
    type Item = &'a FieldError;
    type IntoIter = core::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl core::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn core::error::Error + 'static))
    }
}

/// Problems with the `\...\` tag block in front of a sentence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagBlockError {
    /// The closing `\` is missing.
    Unterminated,
    /// The tag block has no `*` before its checksum.
    ChecksumSeparator,
    /// The tag block checksum does not match its content.
    ChecksumMismatch { calculated: u8, found: String },
    /// An item without the `:` between key and value.
    MalformedPair(String),
    /// A numeric tag whose value is not a number.
    InvalidValue { key: char, value: String },
}

impl fmt::Display for TagBlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagBlockError::Unterminated => write!(f, "tag block is missing '\\' at the end"),
            TagBlockError::ChecksumSeparator => {
                write!(f, "tag block does not contain checksum separator")
            }
            TagBlockError::ChecksumMismatch { calculated, found } => write!(
                f,
                "tag block checksum mismatch [{:02X} != {}]",
                calculated, found
            ),
            TagBlockError::MalformedPair(item) => {
                write!(f, "tag block item is not a key:value pair [{}]", item)
            }
            TagBlockError::InvalidValue { key, value } => {
                write!(f, "tag block unable to parse value [{}:{}]", key, value)
            }
        }
    }
}

impl core::error::Error for TagBlockError {}

/// Everything that can go wrong turning a line of text into a typed sentence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The first character is neither `$` nor `!`.
    MissingStartToken,
    /// The sentence has no `*`, or more than one.
    ChecksumSeparator,
    /// The checksum of the sentence was corrupt or wrong.
    ChecksumMismatch { calculated: u8, found: String },
    /// The address field is too short to hold a talker id and a sentence type.
    InvalidAddress(String),
    /// The tag block preceding the sentence is malformed.
    TagBlock(TagBlockError),
    /// No decoder is registered for the sentence prefix.
    Unsupported(String),
    /// A known sentence with one or more malformed fields.
    Parse(ParseError),
    /// A decoder for the prefix is already registered.
    DuplicateDecoder(String),
}

impl Error {
    /// Returns `true` for errors raised before any field was looked at.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MissingStartToken
                | Error::ChecksumSeparator
                | Error::ChecksumMismatch { .. }
                | Error::InvalidAddress(_)
                | Error::TagBlock(_)
        )
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<TagBlockError> for Error {
    fn from(error: TagBlockError) -> Self {
        Self::TagBlock(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingStartToken => {
                write!(f, "sentence does not start with a '$' or '!'")
            }
            Error::ChecksumSeparator => {
                write!(f, "sentence does not contain single checksum separator")
            }
            Error::ChecksumMismatch { calculated, found } => write!(
                f,
                "sentence checksum mismatch [{:02X} != {}]",
                calculated, found
            ),
            Error::InvalidAddress(address) => {
                write!(f, "sentence prefix too short: '{}'", address)
            }
            Error::TagBlock(e) => write!(f, "{}", e),
            Error::Unsupported(prefix) => {
                write!(f, "sentence prefix '{}' not supported", prefix)
            }
            Error::Parse(e) => write!(f, "{}", e),
            Error::DuplicateDecoder(prefix) => {
                write!(f, "decoder for sentence type '{}' already exists", prefix)
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::TagBlock(e) => Some(e),
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}
