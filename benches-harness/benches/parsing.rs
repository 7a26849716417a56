use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use nmea0183::{
    ParseResult, Registry, armor::decode_six_bit_ascii, parse_nmea_sentence, sentences::parse_gsv,
};

static GSV_SENTENCES: [&str; 6] = [
    "$GPGSV,3,1,12,01,49,196,41,03,71,278,32,06,02,323,27,11,21,196,39*72",
    "$GPGSV,3,2,12,14,39,063,33,17,21,292,30,19,20,310,31,22,82,181,36*73",
    "$GPGSV,3,3,12,23,34,232,42,25,11,045,33,31,45,092,38,32,14,061,39*75",
    "$GLGSV,3,1,10,74,40,078,43,66,23,275,31,82,10,347,36,73,15,015,38*6B",
    "$GLGSV,3,2,10,75,19,135,36,65,76,333,31,88,32,233,33,81,40,302,38*6A",
    "$GLGSV,3,3,10,72,40,075,43,87,00,000,*6F",
];

static TAGGED_AIVDM: &str =
    "\\s:Satelite_1,c:1553390539*62\\!AIVDM,1,1,,A,13M@ah0025QdPDTCOl`K6`nV00Sv,0*52";

fn tokenizer_benchmark(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("tokenize");

    bench_group.bench_function("GSV", |b| {
        b.iter(|| {
            for line in &GSV_SENTENCES {
                black_box(parse_nmea_sentence(black_box(line)).unwrap());
            }
        })
    });

    bench_group.bench_function("AIVDM with tag block", |b| {
        b.iter(|| black_box(parse_nmea_sentence(black_box(TAGGED_AIVDM)).unwrap()))
    });
}

fn decoder_benchmark(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("decode");

    let sentences = GSV_SENTENCES
        .iter()
        .map(|line| parse_nmea_sentence(line).unwrap())
        .collect::<Vec<_>>();
    bench_group.bench_function("parse_gsv", |b| {
        b.iter(|| {
            for sentence in &sentences {
                black_box(parse_gsv(black_box(sentence)).unwrap());
            }
        })
    });

    let registry = Registry::default();
    bench_group.bench_function("Registry::parse GSV", |b| {
        b.iter(|| {
            for line in &GSV_SENTENCES {
                let result = registry.parse(black_box(line)).unwrap();
                assert!(matches!(result, ParseResult::GSV(_)));
            }
        })
    });
}

fn armor_benchmark(c: &mut Criterion) {
    c.bench_function("decode_six_bit_ascii", |b| {
        b.iter(|| black_box(decode_six_bit_ascii(black_box("13aGt0PP0jPN@9fMPKVDJgwfR>`<"), 0)))
    });
}

criterion_group!(
    benches,
    tokenizer_benchmark,
    decoder_benchmark,
    armor_benchmark
);
criterion_main!(benches);
