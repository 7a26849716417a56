//! NMEA 0183 sentence parser
//!
//! A line goes through three stages:
//!
//! 1. [`parse_nmea_sentence`] validates the framing and the checksums and
//!    splits the line into an address and its fields, see [`NmeaSentence`].
//! 2. A decoder turns the fields into typed data with a [`FieldParser`],
//!    collecting every bad field into one [`ParseError`].
//! 3. A [`Registry`] picks the decoder by sentence type, built-in decoders
//!    produce a [`ParseResult`] variant, runtime registered ones
//!    [`ParseResult::Custom`].
//!
//! Units used everywhere: degrees, knots, meters.
//!
//! ```
//! use nmea0183::{ParseResult, Registry};
//!
//! let registry = Registry::default();
//! match registry.parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58") {
//!     Ok(ParseResult::GLL(gll)) => {
//!         assert_eq!(gll.time.to_string(), "02:27:32.000");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Crate features
#![cfg_attr(
    feature = "features-docs",
    doc = ::document_features::document_features!()
)]
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod armor;
pub mod coordinate;
pub mod datetime;
pub mod error;
mod parse;
mod parser;
mod registry;
pub mod sentences;
#[cfg(feature = "std")]
pub mod stream;
pub mod tag_block;

use core::fmt;

#[doc(inline)]
pub use error::{Error, FieldError, ParseError};
pub use parse::{
    AddressParser, CHECKSUM_SEP, ChecksumCheck, FIELD_SEP, NmeaSentence, PROPRIETARY_PREFIX,
    QUERY_SUFFIX, SENTENCE_START, SENTENCE_START_ENCAPSULATED, SentenceParser, TagBlockHook,
    checksum, checksum_hex, parse_address, parse_nmea_sentence, verify_checksum,
};
pub use parser::FieldParser;
#[cfg(feature = "std")]
pub use registry::{must_register, parse_str, register};
pub use registry::{Decoder, Registry};
#[doc(inline)]
pub use sentences::*;

macro_rules! count_tts {
    () => {0usize};
    ($_head:tt , $($tail:tt)*) => {1usize + count_tts!($($tail)*)};
    ($item:tt) => {1usize};
}

macro_rules! define_sentence_type_enum {
    (
        $(#[$outer:meta])*
        pub enum $Name:ident {
            $(
            $(#[$variant:meta])*
            $Variant:ident
            ),* $(,)* }
    ) => {
        $(#[$outer])*
        pub enum $Name {
            $(
                $(#[$variant])*
                $Variant
            ),*,
        }

        impl TryFrom<&str> for $Name {
            type Error = Error;

            fn try_from(s: &str) -> Result<$Name, Self::Error> {
                match s {
                    $(stringify!($Variant) => Ok($Name::$Variant),)*
                    _ => Err(Error::Unsupported(s.into())),
                }
            }
        }

        impl $Name {
            const COUNT: usize = count_tts!($($Variant),*);
            pub const TYPES: [$Name; $Name::COUNT] = [$($Name::$Variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($Name::$Variant => stringify!($Variant),)*
                }
            }
        }

        impl fmt::Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    }
}

define_sentence_type_enum! {
    /// Sentence types with a built-in decoder
    ///
    /// The built-in [`Registry`] only holds the ones whose cargo feature is
    /// enabled. `VDO` is decoded by the `VDM` decoder.
    ///
    /// ```
    /// use nmea0183::SentenceType;
    ///
    /// assert_eq!(SentenceType::try_from("GLL").unwrap(), SentenceType::GLL);
    /// assert!(SentenceType::try_from("XDR").is_err());
    /// ```
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum SentenceType {
        /// GGA - Global Positioning System Fix Data
        GGA,
        /// GLL - Geographic Position - Latitude/Longitude
        GLL,
        /// GSA - GNSS DOP and Active Satellites
        GSA,
        /// GSV - GNSS Satellites in View
        GSV,
        /// HDT - Heading - True
        HDT,
        /// Query, `$ttllQ,c--c`
        Q,
        /// RMC - Recommended Minimum Navigation Information
        RMC,
        /// TXT - Text Transmission
        TXT,
        /// VDM - AIS VHF Data-Link Message
        VDM,
        /// VDO - AIS VHF Data-Link Own-Vessel Report
        VDO,
        /// VTG - Track made good and Ground speed
        VTG,
        /// ZDA - Time & Date - UTC, day, month, year and local time zone
        ZDA,
    }
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
