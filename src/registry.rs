//! Dispatch of tokenized sentences to their decoders.

use alloc::{boxed::Box, collections::BTreeMap, string::String};
use core::fmt;

use crate::{Error, NmeaSentence, ParseError, ParseResult, SentenceParser};

/// Decodes one tokenized sentence.
pub type Decoder = Box<dyn Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync>;

struct Entry {
    /// Start token the decoder is limited to, any when `None`.
    start: Option<char>,
    decoder: Decoder,
}

impl Entry {
    fn accepts(&self, sentence: &NmeaSentence) -> bool {
        self.start
            .is_none_or(|start| start == sentence.start_token())
    }
}

/// Maps sentence types (or whole address fields) to decoders.
///
/// [`Registry::new`] starts empty, [`Registry::with_builtins`] (also
/// [`Default`]) holds a decoder for every enabled sentence feature.
/// A prefix is never registered twice.
///
/// Built-in decoders only take sentences with their own start token, `!`
/// for `VDM`/`VDO` and `$` for the others. Registered decoders take both.
///
/// Lines are tokenized with a [`SentenceParser`], replaced with
/// [`Registry::with_sentence_parser`].
///
/// # Examples
///
/// ```
/// use nmea0183::{ParseResult, Registry};
///
/// let registry = Registry::default();
/// let parsed = registry.parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58").unwrap();
/// let ParseResult::GLL(gll) = parsed else { panic!() };
/// assert_eq!(gll.validity, "A");
/// ```
pub struct Registry {
    decoders: BTreeMap<String, Entry>,
    parser: SentenceParser,
}

impl Registry {
    /// A registry without any decoder.
    pub fn new() -> Self {
        Self {
            decoders: BTreeMap::new(),
            parser: SentenceParser::new(),
        }
    }

    /// A registry with the decoders of the enabled sentence features.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert_builtins();
        registry
    }

    fn insert_builtins(&mut self) {
        #[cfg(feature = "GGA")]
        self.insert(crate::SentenceType::GGA.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_gga(s).map(ParseResult::GGA)
        });
        #[cfg(feature = "GLL")]
        self.insert(crate::SentenceType::GLL.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_gll(s).map(ParseResult::GLL)
        });
        #[cfg(feature = "GSA")]
        self.insert(crate::SentenceType::GSA.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_gsa(s).map(ParseResult::GSA)
        });
        #[cfg(feature = "GSV")]
        self.insert(crate::SentenceType::GSV.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_gsv(s).map(ParseResult::GSV)
        });
        #[cfg(feature = "HDT")]
        self.insert(crate::SentenceType::HDT.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_hdt(s).map(ParseResult::HDT)
        });
        #[cfg(feature = "Q")]
        self.insert(crate::SentenceType::Q.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_query(s).map(ParseResult::Query)
        });
        #[cfg(feature = "RMC")]
        self.insert(crate::SentenceType::RMC.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_rmc(s).map(ParseResult::RMC)
        });
        #[cfg(feature = "TXT")]
        self.insert(crate::SentenceType::TXT.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_txt(s).map(ParseResult::TXT)
        });
        #[cfg(feature = "VDM")]
        self.insert(
            crate::SentenceType::VDM.as_str(),
            Some(crate::SENTENCE_START_ENCAPSULATED),
            |s| crate::sentences::parse_vdm_vdo(s).map(ParseResult::VDM),
        );
        #[cfg(feature = "VDM")]
        self.insert(
            crate::SentenceType::VDO.as_str(),
            Some(crate::SENTENCE_START_ENCAPSULATED),
            |s| crate::sentences::parse_vdm_vdo(s).map(ParseResult::VDO),
        );
        #[cfg(feature = "VTG")]
        self.insert(crate::SentenceType::VTG.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_vtg(s).map(ParseResult::VTG)
        });
        #[cfg(feature = "ZDA")]
        self.insert(crate::SentenceType::ZDA.as_str(), Some(crate::SENTENCE_START), |s| {
            crate::sentences::parse_zda(s).map(ParseResult::ZDA)
        });
    }

    fn insert<F>(&mut self, prefix: &str, start: Option<char>, decoder: F)
    where
        F: Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync + 'static,
    {
        self.decoders.insert(
            prefix.into(),
            Entry {
                start,
                decoder: Box::new(decoder),
            },
        );
    }

    /// Tokenizes with `parser` instead of the default [`SentenceParser`].
    ///
    /// ```
    /// use nmea0183::{ParseResult, Registry, SentenceParser};
    ///
    /// let registry = Registry::default()
    ///     .with_sentence_parser(SentenceParser::new().with_checksum_check(|_, _| Ok(())));
    /// let parsed = registry.parse("$GPHDT,274.07,T").unwrap();
    /// assert!(matches!(parsed, ParseResult::HDT(_)));
    /// ```
    pub fn with_sentence_parser(mut self, parser: SentenceParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn sentence_parser(&self) -> &SentenceParser {
        &self.parser
    }

    /// Adds a decoder for `prefix`, a sentence type such as `XDR` or a
    /// whole address field such as `PGRME`.
    ///
    /// Fails with [`Error::DuplicateDecoder`], keeping the current decoder,
    /// when `prefix` is already registered.
    pub fn register<F>(&mut self, prefix: &str, decoder: F) -> Result<(), Error>
    where
        F: Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync + 'static,
    {
        if self.contains(prefix) {
            return Err(Error::DuplicateDecoder(prefix.into()));
        }
        self.insert(prefix, None, decoder);
        Ok(())
    }

    /// Same as [`Registry::register`] for registrations done once at start up.
    ///
    /// # Panics
    ///
    /// When `prefix` is already registered.
    pub fn must_register<F>(&mut self, prefix: &str, decoder: F)
    where
        F: Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync + 'static,
    {
        if let Err(e) = self.register(prefix, decoder) {
            panic!("{}", e);
        }
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.decoders.contains_key(prefix)
    }

    /// Registered prefixes in lexicographic order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.decoders.keys().map(String::as_str)
    }

    /// Decodes with the decoder of the sentence type, falling back to the
    /// decoder of the whole address field.
    ///
    /// A sentence whose start token the decoder does not take is
    /// [`Error::Unsupported`].
    pub fn decode(&self, sentence: &NmeaSentence) -> Result<ParseResult, Error> {
        let entry = [sentence.data_type(), sentence.address()]
            .into_iter()
            .filter_map(|prefix| self.decoders.get(prefix))
            .find(|entry| entry.accepts(sentence))
            .ok_or_else(|| Error::Unsupported(sentence.prefix()))?;

        Ok((entry.decoder)(sentence)?)
    }

    /// Tokenizes and decodes one line.
    pub fn parse(&self, line: &str) -> Result<ParseResult, Error> {
        let sentence = self.parser.parse(line)?;
        self.decode(&sentence)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("prefixes", &self.prefixes().collect::<alloc::vec::Vec<_>>())
            .field("parser", &self.parser)
            .finish()
    }
}

#[cfg(feature = "std")]
mod default {
    use std::sync::{OnceLock, PoisonError, RwLock};

    use super::Registry;
    use crate::{Error, NmeaSentence, ParseError, ParseResult};

    fn registry() -> &'static RwLock<Registry> {
        static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
        REGISTRY.get_or_init(|| RwLock::new(Registry::with_builtins()))
    }

    /// [`Registry::register`] on the process-wide registry.
    ///
    /// Registrations should happen before decoding starts, lookups wait
    /// for a registration in progress.
    pub fn register<F>(prefix: &str, decoder: F) -> Result<(), Error>
    where
        F: Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync + 'static,
    {
        registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(prefix, decoder)
    }

    /// [`Registry::must_register`] on the process-wide registry.
    ///
    /// # Panics
    ///
    /// When `prefix` is already registered.
    pub fn must_register<F>(prefix: &str, decoder: F)
    where
        F: Fn(&NmeaSentence) -> Result<ParseResult, ParseError> + Send + Sync + 'static,
    {
        if let Err(e) = register(prefix, decoder) {
            panic!("{}", e);
        }
    }

    /// Tokenizes and decodes one line with the process-wide registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmea0183::{ParseResult, parse_str};
    ///
    /// let ParseResult::HDT(hdt) = parse_str("$GPHDT,274.07,T*03").unwrap() else {
    ///     panic!()
    /// };
    /// assert_eq!(hdt.heading, 274.07);
    /// ```
    pub fn parse_str(line: &str) -> Result<ParseResult, Error> {
        registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .parse(line)
    }
}

#[cfg(feature = "std")]
pub use default::{must_register, parse_str, register};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldParser;
    use alloc::{format, string::ToString, vec::Vec};
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Marker(&'static str);

    impl crate::CustomSentence for Marker {
        fn data_type(&self) -> &str {
            self.0
        }

        fn as_any(&self) -> &dyn core::any::Any {
            self
        }
    }

    fn marker(name: &'static str) -> impl Fn(&NmeaSentence) -> Result<ParseResult, ParseError> {
        move |_| Ok(ParseResult::Custom(Box::new(Marker(name))))
    }

    fn marker_name(result: &ParseResult) -> &str {
        match result {
            ParseResult::Custom(custom) => custom.downcast_ref::<Marker>().map_or("", |m| m.0),
            _ => "",
        }
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = Registry::new();
        assert_eq!(registry.prefixes().count(), 0);
        assert_eq!(
            registry
                .parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58")
                .unwrap_err(),
            Error::Unsupported("GPGLL".into())
        );
    }

    #[test]
    fn duplicate_is_rejected_and_first_kept() {
        let mut registry = Registry::new();
        registry.register("GLL", marker("first")).unwrap();
        assert_eq!(
            registry.register("GLL", marker("second")),
            Err(Error::DuplicateDecoder("GLL".into()))
        );
        let parsed = registry
            .parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58")
            .unwrap();
        assert_eq!(marker_name(&parsed), "first");
    }

    #[test]
    #[should_panic(expected = "decoder for sentence type 'GLL' already exists")]
    fn must_register_panics_on_duplicate() {
        let mut registry = Registry::new();
        registry.must_register("GLL", marker("first"));
        registry.must_register("GLL", marker("second"));
    }

    #[test]
    fn address_fallback() {
        let mut registry = Registry::new();
        registry.register("PGRME", marker("garmin")).unwrap();
        registry.register("YXXDR", marker("xdr")).unwrap();
        assert_eq!(registry.prefixes().collect::<Vec<_>>(), ["PGRME", "YXXDR"]);

        let parsed = registry.parse("$PGRME,15.0,M,45.0,M,25.0,M*1C").unwrap();
        assert_eq!(marker_name(&parsed), "garmin");
        let parsed = registry.parse("$YXXDR,A,-1.0,D,PTCH*47").unwrap();
        assert_eq!(marker_name(&parsed), "xdr");
        assert_eq!(parsed.sentence_type(), "xdr");
    }

    #[test]
    fn unknown_prefix_is_not_a_parse_error() {
        let registry = Registry::default();
        let err = registry.parse("$YXXDR,A,-1.0,D,PTCH*47").unwrap_err();
        assert_eq!(err, Error::Unsupported("YXXDR".into()));
        assert!(!matches!(err, Error::Parse(_)));
        assert_eq!(err.to_string(), "sentence prefix 'YXXDR' not supported");
    }

    #[test]
    fn decoder_errors_are_parse_errors() {
        let mut registry = Registry::new();
        registry
            .register("XDR", |s| {
                let mut p = FieldParser::new(s);
                p.float64(0, "measurement type");
                p.finish(ParseResult::Custom(Box::new(Marker("xdr"))))
            })
            .unwrap();
        let err = registry.parse("$YXXDR,A,-1.0,D,PTCH*47").unwrap_err();
        let Error::Parse(err) = err else {
            panic!("expected a parse error, got {:?}", err);
        };
        assert_eq!(err.to_string(), "YXXDR invalid measurement type: A");
    }

    #[test]
    fn structural_errors_come_first() {
        let registry = Registry::default();
        assert_eq!(
            registry
                .parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*59")
                .unwrap_err(),
            Error::ChecksumMismatch {
                calculated: 0x58,
                found: "59".into()
            }
        );
    }

    #[cfg(all(feature = "GLL", feature = "VDM"))]
    #[test]
    fn builtins_keep_their_start_token() {
        let registry = Registry::default();
        assert_eq!(
            registry
                .parse("!GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58")
                .unwrap_err(),
            Error::Unsupported("GPGLL".into())
        );
        assert_eq!(
            registry
                .parse("$AIVDM,1,1,,A,13aGt0PP0jPN@9fMPKVDJgwfR>`<,0*55")
                .unwrap_err(),
            Error::Unsupported("AIVDM".into())
        );
    }

    #[test]
    fn registered_decoders_take_any_start_token() {
        let mut registry = Registry::new();
        registry.register("GLL", marker("gll")).unwrap();
        for line in [
            "$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58",
            "!GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58",
        ] {
            assert_eq!(marker_name(&registry.parse(line).unwrap()), "gll");
        }
    }

    #[cfg(feature = "HDT")]
    #[test]
    fn lenient_checksum() {
        let line = "$GPHDT,274.07,T";
        assert_eq!(
            Registry::default().parse(line).unwrap_err(),
            Error::ChecksumSeparator
        );

        let registry = Registry::default()
            .with_sentence_parser(SentenceParser::new().with_checksum_check(|_, _| Ok(())));
        let ParseResult::HDT(hdt) = registry.parse(line).unwrap() else {
            panic!("expected HDT");
        };
        approx::assert_relative_eq!(hdt.heading, 274.07);
    }

    #[cfg(feature = "GLL")]
    #[test]
    fn address_without_talker() {
        let registry = Registry::default().with_sentence_parser(
            SentenceParser::new().with_address_parser(|address| match address.len() {
                3 => Ok((arrayvec::ArrayString::new(), address.into())),
                _ => crate::parse_address(address),
            }),
        );
        let parsed = registry
            .parse("$GLL,3926.7952,N,12000.5947,W,022732,A,A*4F")
            .unwrap();
        assert_eq!(parsed.sentence_type(), "GLL");
    }

    #[test]
    fn tag_block_hook() {
        use alloc::sync::Arc;
        use core::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new().with_sentence_parser(
            SentenceParser::new().with_tag_block_hook({
                let calls = Arc::clone(&calls);
                move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );
        registry.register("VDM", marker("vdm")).unwrap();

        registry
            .parse("\\s:Satelite_1,c:1553390539*62\\!AIVDM,1,1,,A,13M@ah0025QdPDTCOl`K6`nV00Sv,0*52")
            .unwrap();
        registry
            .parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58")
            .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(format!("{:?}", registry.sentence_parser()).contains("tag_block_hook: true"));
    }

    #[cfg(all(feature = "GLL", feature = "GGA", feature = "VDM"))]
    #[test]
    fn builtins() {
        let registry = Registry::default();
        assert!(registry.contains("GLL"));
        assert!(registry.contains("VDO"));
        assert!(!registry.contains("XDR"));

        let parsed = registry
            .parse("$GNGGA,203415.000,6325.6138,N,01021.4290,E,1,8,2.42,72.5,M,41.5,M,,*7C")
            .unwrap();
        assert_eq!(parsed.sentence_type(), "GGA");
        assert!(matches!(parsed, ParseResult::GGA(_)));

        let parsed = registry
            .parse("!AIVDM,1,1,,A,13aGt0PP0jPN@9fMPKVDJgwfR>`<,0*55")
            .unwrap();
        assert_eq!(parsed.sentence_type(), "VDM");
    }
}
