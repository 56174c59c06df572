// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text encodings, reader limits and the built-in converter table.

use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use ubin::{
    Binary, CodecConfig, ConverterCatalog, DataError, Error, Mode, SafeCodec, TextEncoding,
    UnsafeCodec, Version,
};

#[derive(Debug, Default, Clone, PartialEq, Binary)]
struct Label {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Binary)]
struct Record {
    #[bin(index = 0)]
    created: NaiveDateTime,
    #[bin(index = 1)]
    ttl: TimeDelta,
    #[bin(index = 2)]
    published: DateTime<FixedOffset>,
    #[bin(index = 3)]
    price: Decimal,
    #[bin(index = 4)]
    id: Uuid,
    #[bin(index = 5)]
    homepage: Url,
    #[bin(index = 6)]
    version: Version,
    #[bin(index = 7)]
    encoding: TextEncoding,
    #[bin(index = 8)]
    initial: char,
    #[bin(index = 9)]
    history: VecDeque<i64>,
    #[bin(index = 10)]
    digest: [u8; 8],
    #[bin(index = 11)]
    tags: Box<[String]>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            created: NaiveDateTime::default(),
            ttl: TimeDelta::zero(),
            published: DateTime::default(),
            price: Decimal::ZERO,
            id: Uuid::nil(),
            homepage: Url::parse("about:blank").expect("static url"),
            version: Version::new(0, 0),
            encoding: TextEncoding::Utf8,
            initial: ' ',
            history: VecDeque::new(),
            digest: [0; 8],
            tags: Box::default(),
        }
    }
}

fn sample_record() -> Record {
    let created = NaiveDate::from_ymd_opt(2024, 2, 29)
        .and_then(|d| d.and_hms_nano_opt(13, 45, 7, 123_456_700))
        .expect("valid instant");
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset");
    Record {
        created,
        ttl: TimeDelta::milliseconds(-90_061_001),
        published: created.and_local_timezone(offset).single().expect("unambiguous"),
        price: "-12345.6789".parse().expect("decimal literal"),
        id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("uuid literal"),
        homepage: Url::parse("https://example.org/a?b=c").expect("url literal"),
        version: Version::new(4, 8).with_build(1),
        encoding: TextEncoding::Latin1,
        initial: 'Z',
        history: VecDeque::from([i64::MIN, -1, 0, i64::MAX]),
        digest: *b"\x00\x01\x02\x03\xfc\xfd\xfe\xff",
        tags: vec!["alpha".to_string(), String::new()].into_boxed_slice(),
    }
}

#[test]
fn builtin_types_round_trip_in_both_modes() {
    let record = sample_record();

    let safe = SafeCodec::<Record>::new().expect("safe codec");
    let bytes = safe.serialize(&record).expect("safe serialize");
    assert_eq!(safe.deserialize(&bytes).expect("safe deserialize"), record);

    let fixed = UnsafeCodec::<Record>::new().expect("unsafe codec");
    let bytes = fixed.serialize(&record).expect("unsafe serialize");
    assert_eq!(fixed.deserialize(&bytes).expect("unsafe deserialize"), record);
}

#[test]
fn builtin_layouts_are_stable() {
    let codec = UnsafeCodec::<Record>::new().expect("unsafe codec");
    let record = Record {
        created: NaiveDate::from_ymd_opt(1, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("epoch"),
        ..sample_record()
    };
    let bytes = codec.serialize(&record).expect("serialize");

    // created: ticks since 0001-01-01
    assert_eq!(&bytes[..8], &0i64.to_le_bytes());
    // ttl: -90 061.001 s in 100 ns ticks
    assert_eq!(&bytes[8..16], &(-900_610_010_000i64).to_le_bytes());
    // published: local ticks then the +05:30 offset in ticks
    assert_eq!(&bytes[24..32], &(19_800i64 * 10_000_000).to_le_bytes());
    // price: 96-bit magnitude then scale and sign flags
    assert_eq!(&bytes[32..36], &123_456_789u32.to_le_bytes());
    assert_eq!(&bytes[44..48], &0x8004_0000u32.to_le_bytes());
    // id: RFC byte order
    assert_eq!(&bytes[48..64], record.id.as_bytes());
}

#[test]
fn version_and_code_page_layouts() {
    #[derive(Debug, Default, PartialEq, Binary)]
    struct Manifest {
        version: Version,
        encoding: TextEncoding,
    }

    let codec = UnsafeCodec::<Manifest>::new().expect("codec");
    let bytes = codec
        .serialize(&Manifest {
            version: Version::new(1, 2),
            encoding: TextEncoding::Utf16Le,
        })
        .expect("serialize");
    let mut expected = Vec::new();
    for part in [1i32, 2, -1, -1, 1200] {
        expected.extend_from_slice(&part.to_le_bytes());
    }
    assert_eq!(bytes, expected);

    let mut unknown = bytes.clone();
    unknown[16..].copy_from_slice(&437i32.to_le_bytes());
    assert!(matches!(
        codec.deserialize(&unknown),
        Err(Error::Data(DataError::InvalidValue { .. }))
    ));
}

#[test]
fn out_of_range_instant_is_a_value_error() {
    #[derive(Debug, Default, Binary)]
    struct Stamp {
        at: NaiveDateTime,
    }

    let codec = SafeCodec::<Stamp>::new().expect("codec");
    let err = codec
        .serialize(&Stamp {
            at: NaiveDateTime::MAX,
        })
        .unwrap_err();
    assert!(
        matches!(err, Error::Value { member: Some(ref m), .. } if m == "at"),
        "{err}"
    );
}

#[test]
fn per_call_encoding_overrides_the_default() {
    let codec = SafeCodec::<Label>::new().expect("codec");
    let label = Label {
        text: "héllo".to_string(),
    };

    let utf8 = codec.serialize(&label).expect("utf-8");
    assert_eq!(utf8[2], 6);

    let utf16 = codec
        .serialize_with(&label, TextEncoding::Utf16Le)
        .expect("utf-16");
    assert_eq!(utf16[2], 10);
    assert_eq!(&utf16[3..5], &[b'h', 0]);
    assert_eq!(
        codec
            .deserialize_with(&utf16, TextEncoding::Utf16Le)
            .expect("utf-16 decode"),
        label
    );

    let latin1 = codec
        .serialize_with(&label, TextEncoding::Latin1)
        .expect("latin-1");
    assert_eq!(&latin1[2..], &[5, b'h', 0xE9, b'l', b'l', b'o']);
}

#[test]
fn default_encoding_can_be_changed_per_instance() {
    let mut codec = UnsafeCodec::<Label>::new().expect("codec");
    let label = Label {
        text: "héllo".to_string(),
    };
    assert_eq!(codec.config().encoding, TextEncoding::Ascii);
    assert_eq!(
        codec.serialize(&label).expect("ascii"),
        [5, b'h', b'?', b'l', b'l', b'o']
    );

    codec.set_default_encoding(TextEncoding::Utf8);
    let bytes = codec.serialize(&label).expect("utf-8");
    assert_eq!(codec.deserialize(&bytes).expect("decode"), label);
}

#[test]
fn chars_follow_the_active_encoding() {
    #[derive(Debug, Default, PartialEq, Binary)]
    struct Glyph {
        c: char,
    }

    let codec = SafeCodec::<Glyph>::new().expect("codec");
    for c in ['a', 'é', '€', '🦀'] {
        let glyph = Glyph { c };
        let bytes = codec.serialize(&glyph).expect("utf-8");
        assert_eq!(bytes.len() - 2, c.len_utf8());
        assert_eq!(codec.deserialize(&bytes).expect("utf-8 decode"), glyph);

        let bytes = codec
            .serialize_with(&glyph, TextEncoding::Utf16Le)
            .expect("utf-16");
        assert_eq!(bytes.len() - 2, c.len_utf16() * 2);
        assert_eq!(
            codec
                .deserialize_with(&bytes, TextEncoding::Utf16Le)
                .expect("utf-16 decode"),
            glyph
        );
    }
}

#[test]
fn invalid_utf8_is_a_data_error() {
    let codec = SafeCodec::<Label>::new().expect("codec");
    assert!(matches!(
        codec.deserialize(&[0, 0, 2, 0xC3, 0x28]),
        Err(Error::Data(DataError::InvalidValue { what: "string", .. }))
    ));
}

#[test]
fn reader_limits_come_from_the_config() {
    #[derive(Debug, Default, PartialEq, Binary)]
    struct Bag {
        #[bin(index = 0)]
        name: String,
        #[bin(index = 1)]
        items: Vec<u8>,
    }

    let config = CodecConfig::for_mode(Mode::Safe)
        .with_max_text_bytes(4)
        .with_max_collection_len(3);
    let codec = SafeCodec::<Bag>::build(config, ConverterCatalog::new()).expect("codec");

    let fits = Bag {
        name: "abcd".to_string(),
        items: vec![1, 2, 3],
    };
    let bytes = codec.serialize(&fits).expect("serialize");
    assert_eq!(codec.deserialize(&bytes).expect("within limits"), fits);

    let long_name = codec
        .serialize(&Bag {
            name: "abcde".to_string(),
            ..Bag::default()
        })
        .expect("limits apply to reading only");
    assert!(matches!(
        codec.deserialize(&long_name),
        Err(Error::Data(DataError::InvalidValue {
            what: "string length",
            ..
        }))
    ));

    let many = codec
        .serialize(&Bag {
            items: vec![0; 4],
            ..Bag::default()
        })
        .expect("serialize");
    assert!(matches!(
        codec.deserialize(&many),
        Err(Error::Data(DataError::InvalidCount { count: 4, .. }))
    ));
}
