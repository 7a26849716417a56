use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use nmea0183::{
    CustomSentence, Error, FieldError, FieldParser, ParseResult, Registry, must_register,
    parse_nmea_sentence, parse_str, register,
};

#[test]
fn test_end_to_end_gll() {
    let ParseResult::GLL(gll) = parse_str("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58").unwrap()
    else {
        panic!("expected GLL");
    };
    assert_relative_eq!(gll.latitude, 39.44659, epsilon = 1e-5);
    assert_relative_eq!(gll.longitude, -120.00991, epsilon = 1e-5);
    assert_eq!(gll.time.to_string(), "02:27:32.000");
    assert_eq!(gll.validity, "A");
    assert_eq!(gll.faa_mode, "A");
}

#[test]
fn test_field_errors_are_accumulated_in_order() {
    let err = parse_str("$GPGLL,9926.7952,N,12000.5947,W,022732,X,A*4B").unwrap_err();
    let Error::Parse(err) = err else {
        panic!("expected a field error, got {:?}", err);
    };
    assert_eq!(
        err.errors(),
        [
            FieldError::new("GPGLL", "latitude", "latitude is not in range (-90, 90)"),
            FieldError::new("GPGLL", "validity", "X"),
        ]
    );
    assert_eq!(
        err.to_string(),
        "GPGLL invalid latitude: latitude is not in range (-90, 90); GPGLL invalid validity: X"
    );
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        parse_str("GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58").unwrap_err(),
        Error::MissingStartToken
    );
    let err = parse_str("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*00").unwrap_err();
    assert!(err.is_structural());
    assert_eq!(err.to_string(), "sentence checksum mismatch [58 != 00]");
    assert_eq!(
        parse_str("$GPXXX,1,2*4C").unwrap_err(),
        Error::Unsupported("GPXXX".into())
    );
}

#[test]
fn test_tag_block_travels_with_the_sentence() {
    let s = parse_nmea_sentence(
        "\\s:Satelite_1,c:1553390539*62\\!AIVDM,1,1,,A,13M@ah0025QdPDTCOl`K6`nV00Sv,0*52",
    )
    .unwrap();
    let tag_block = s.tag_block.as_ref().unwrap();
    assert_eq!(tag_block.source, "Satelite_1");
    assert_eq!(tag_block.unix_seconds(), 1553390539);

    let ParseResult::VDM(vdm) = Registry::default().decode(&s).unwrap() else {
        panic!("expected VDM");
    };
    assert_eq!(vdm.message_type(), Some(1));
}

#[derive(Debug, PartialEq)]
struct Xdr {
    measurement_type: String,
    value: f64,
    units: String,
    name: String,
}

impl CustomSentence for Xdr {
    fn data_type(&self) -> &str {
        "XDR"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn parse_xdr(s: &nmea0183::NmeaSentence) -> Result<ParseResult, nmea0183::ParseError> {
    let mut p = FieldParser::new(s);
    p.assert_type("XDR");
    let xdr = Xdr {
        measurement_type: p.string(0, "measurement type"),
        value: p.float64(1, "value"),
        units: p.string(2, "units"),
        name: p.string(3, "name"),
    };
    Ok(ParseResult::Custom(Box::new(p.finish(xdr)?)))
}

#[test]
fn test_custom_decoder_in_default_registry() {
    must_register("XDR", parse_xdr);
    assert_eq!(
        register("XDR", parse_xdr),
        Err(Error::DuplicateDecoder("XDR".into()))
    );
    assert_eq!(
        register("GGA", parse_xdr),
        Err(Error::DuplicateDecoder("GGA".into()))
    );

    let parsed = parse_str("$YXXDR,A,-1.0,D,PTCH*47").unwrap();
    assert_eq!(parsed.sentence_type(), "XDR");
    let ParseResult::Custom(custom) = parsed else {
        panic!("expected a custom sentence");
    };
    assert!(custom.is::<Xdr>());
    assert_eq!(
        custom.downcast_ref::<Xdr>(),
        Some(&Xdr {
            measurement_type: "A".into(),
            value: -1.,
            units: "D".into(),
            name: "PTCH".into(),
        })
    );

    // the built-in GGA decoder is still in place
    assert!(matches!(
        parse_str("$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76"),
        Ok(ParseResult::GGA(_))
    ));
}

#[test]
fn test_proprietary_decoder() {
    let mut registry = Registry::new();
    registry
        .register("PGRME", |s| {
            let mut p = FieldParser::new(s);
            let xdr = Xdr {
                measurement_type: "PGRME".into(),
                value: p.float64(0, "horizontal error"),
                units: p.string(1, "units"),
                name: String::new(),
            };
            Ok(ParseResult::Custom(Box::new(p.finish(xdr)?)))
        })
        .unwrap();

    let ParseResult::Custom(custom) = registry.parse("$PGRME,15.0,M,45.0,M,25.0,M*1C").unwrap()
    else {
        panic!("expected a custom sentence");
    };
    let pgrme = custom.downcast_ref::<Xdr>().unwrap();
    assert_eq!(pgrme.value, 15.);
    assert_eq!(pgrme.units, "M");
}
