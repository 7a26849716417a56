//! All the built-in sentence decoders and the [`ParseResult`] they produce.

use alloc::boxed::Box;
use core::{any::Any, fmt};

#[cfg(feature = "GGA")]
pub mod gga;
#[cfg(feature = "GLL")]
pub mod gll;
#[cfg(feature = "GSA")]
pub mod gsa;
#[cfg(feature = "GSV")]
pub mod gsv;
#[cfg(feature = "HDT")]
pub mod hdt;
#[cfg(feature = "Q")]
pub mod query;
#[cfg(feature = "RMC")]
pub mod rmc;
#[cfg(feature = "TXT")]
pub mod txt;
#[cfg(feature = "VDM")]
pub mod vdm;
#[cfg(feature = "VTG")]
pub mod vtg;
#[cfg(feature = "ZDA")]
pub mod zda;

pub mod faa_mode;

#[doc(inline)]
pub use faa_mode::FaaMode;

#[cfg(feature = "GGA")]
#[doc(inline)]
pub use gga::{GgaData, parse_gga};
#[cfg(feature = "GLL")]
#[doc(inline)]
pub use gll::{GllData, parse_gll};
#[cfg(feature = "GSA")]
#[doc(inline)]
pub use gsa::{GsaData, parse_gsa};
#[cfg(feature = "GSV")]
#[doc(inline)]
pub use gsv::{GsvData, GsvInfo, parse_gsv};
#[cfg(feature = "HDT")]
#[doc(inline)]
pub use hdt::{HdtData, parse_hdt};
#[cfg(feature = "Q")]
#[doc(inline)]
pub use query::{QueryData, parse_query};
#[cfg(feature = "RMC")]
#[doc(inline)]
pub use rmc::{RmcData, parse_rmc};
#[cfg(feature = "TXT")]
#[doc(inline)]
pub use txt::{TxtData, parse_txt};
#[cfg(feature = "VDM")]
#[doc(inline)]
pub use vdm::{VdmVdoData, parse_vdm_vdo};
#[cfg(feature = "VTG")]
#[doc(inline)]
pub use vtg::{VtgData, parse_vtg};
#[cfg(feature = "ZDA")]
#[doc(inline)]
pub use zda::{ZdaData, parse_zda};

/// A sentence decoded by a decoder registered at runtime.
///
/// The concrete type is recovered with `downcast_ref`.
///
/// ```
/// use core::any::Any;
/// use nmea0183::{CustomSentence, FieldParser, ParseResult, Registry, parse_nmea_sentence};
///
/// #[derive(Debug)]
/// struct Xdr {
///     kind: String,
/// }
///
/// impl CustomSentence for Xdr {
///     fn data_type(&self) -> &str {
///         "XDR"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry
///     .register("XDR", |s| {
///         let mut p = FieldParser::new(s);
///         let kind = p.string(0, "type");
///         Ok(ParseResult::Custom(Box::new(p.finish(Xdr { kind })?)))
///     })
///     .unwrap();
///
/// let parsed = registry.parse("$YXXDR,A,-1.0,D,PTCH*47").unwrap();
/// assert_eq!(parsed.sentence_type(), "XDR");
/// let ParseResult::Custom(custom) = parsed else { panic!() };
/// assert_eq!(custom.downcast_ref::<Xdr>().unwrap().kind, "A");
/// ```
pub trait CustomSentence: fmt::Debug + Send + Sync + 'static {
    /// The sentence type, e.g. `XDR`.
    fn data_type(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

impl dyn CustomSentence {
    pub fn downcast_ref<T: CustomSentence>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn is<T: CustomSentence>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// A decoded sentence.
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum ParseResult {
    #[cfg(feature = "GGA")]
    GGA(GgaData),
    #[cfg(feature = "GLL")]
    GLL(GllData),
    #[cfg(feature = "GSA")]
    GSA(GsaData),
    #[cfg(feature = "GSV")]
    GSV(GsvData),
    #[cfg(feature = "HDT")]
    HDT(HdtData),
    #[cfg(feature = "Q")]
    Query(QueryData),
    #[cfg(feature = "RMC")]
    RMC(RmcData),
    #[cfg(feature = "TXT")]
    TXT(TxtData),
    #[cfg(feature = "VDM")]
    VDM(VdmVdoData),
    #[cfg(feature = "VDM")]
    VDO(VdmVdoData),
    #[cfg(feature = "VTG")]
    VTG(VtgData),
    #[cfg(feature = "ZDA")]
    ZDA(ZdaData),
    /// Produced by a decoder registered at runtime
    Custom(Box<dyn CustomSentence>),
}

impl ParseResult {
    /// The sentence type the result was decoded from, e.g. `GGA`.
    pub fn sentence_type(&self) -> &str {
        use crate::SentenceType;

        match self {
            #[cfg(feature = "GGA")]
            ParseResult::GGA(_) => SentenceType::GGA.as_str(),
            #[cfg(feature = "GLL")]
            ParseResult::GLL(_) => SentenceType::GLL.as_str(),
            #[cfg(feature = "GSA")]
            ParseResult::GSA(_) => SentenceType::GSA.as_str(),
            #[cfg(feature = "GSV")]
            ParseResult::GSV(_) => SentenceType::GSV.as_str(),
            #[cfg(feature = "HDT")]
            ParseResult::HDT(_) => SentenceType::HDT.as_str(),
            #[cfg(feature = "Q")]
            ParseResult::Query(_) => SentenceType::Q.as_str(),
            #[cfg(feature = "RMC")]
            ParseResult::RMC(_) => SentenceType::RMC.as_str(),
            #[cfg(feature = "TXT")]
            ParseResult::TXT(_) => SentenceType::TXT.as_str(),
            #[cfg(feature = "VDM")]
            ParseResult::VDM(_) => SentenceType::VDM.as_str(),
            #[cfg(feature = "VDM")]
            ParseResult::VDO(_) => SentenceType::VDO.as_str(),
            #[cfg(feature = "VTG")]
            ParseResult::VTG(_) => SentenceType::VTG.as_str(),
            #[cfg(feature = "ZDA")]
            ParseResult::ZDA(_) => SentenceType::ZDA.as_str(),
            ParseResult::Custom(custom) => custom.data_type(),
        }
    }
}
