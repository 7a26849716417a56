#![cfg(feature = "serde")]

use nmea0183::{ParseResult, Registry, parse_nmea_sentence, sentences::GllData};
use pretty_assertions::assert_eq;

#[test]
fn test_gll_json() {
    let ParseResult::GLL(gll) = Registry::default()
        .parse("$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58")
        .unwrap()
    else {
        panic!("expected GLL");
    };

    let json = serde_json::to_value(&gll).unwrap();
    assert_eq!(json["validity"], "A");
    assert_eq!(json["time"]["hour"], 2);
    assert_eq!(json["time"]["minute"], 27);

    let back: GllData = serde_json::from_value(json).unwrap();
    assert_eq!(back, gll);
}

#[test]
fn test_sentence_json() {
    let s = parse_nmea_sentence("$GPHDT,123.456,T*32").unwrap();
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["talker_id"], "GP");
    assert_eq!(json["sentence_type"], "HDT");
    assert_eq!(json["fields"], serde_json::json!(["123.456", "T"]));
    assert_eq!(json["checksum"], "32");
    assert_eq!(json["tag_block"], serde_json::Value::Null);
}

#[test]
fn test_field_errors_json() {
    let err = Registry::default()
        .parse("$GPHDT,123.456,X*3E")
        .unwrap_err();
    let nmea0183::Error::Parse(err) = err else {
        panic!("expected a field error");
    };
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({
            "errors": [{"prefix": "GPHDT", "context": "true", "value": "X"}]
        })
    );
}
