// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use ubin::{Binary, UnsafeCodec, Version};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Binary)]
#[repr(u16)]
enum Kind {
    #[default]
    Plain,
    Packed = 7,
}

#[derive(Debug, Default, Binary)]
struct Record {
    #[bin(index = 0)]
    kind: Kind,
    #[bin(index = 1)]
    version: Version,
    #[bin(index = 2)]
    price: rust_decimal::Decimal,
    #[bin(index = 3)]
    offset: chrono::DateTime<chrono::FixedOffset>,
    #[bin(index = 4)]
    initial: char,
    #[bin(index = 5)]
    parts: Vec<Box<[u16]>>,
}

fn codec() -> Option<&'static UnsafeCodec<Record>> {
    static CODEC: OnceLock<Option<UnsafeCodec<Record>>> = OnceLock::new();
    CODEC.get_or_init(|| UnsafeCodec::new().ok()).as_ref()
}

fuzz_target!(|data: &[u8]| {
    let Some(codec) = codec() else { return };
    let _ = codec.deserialize(data);
});
