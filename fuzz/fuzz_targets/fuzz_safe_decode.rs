// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use ubin::{Binary, SafeCodec, TextEncoding};

#[derive(Debug, Default, Binary)]
struct Entry {
    #[bin(index = 0)]
    key: String,
    #[bin(index = 1, generation = 1)]
    tags: Option<Vec<Option<String>>>,
    #[bin(index = 2, generation = 2)]
    stamp: Option<chrono::NaiveDateTime>,
}

#[derive(Debug, Default, Binary)]
struct Document {
    #[bin(index = 0)]
    title: Option<String>,
    #[bin(index = 1)]
    entries: Vec<Entry>,
    #[bin(index = 2, generation = 3)]
    checksum: [u8; 4],
}

fn codec() -> Option<&'static SafeCodec<Document>> {
    static CODEC: OnceLock<Option<SafeCodec<Document>>> = OnceLock::new();
    CODEC.get_or_init(|| SafeCodec::new().ok()).as_ref()
}

fuzz_target!(|data: &[u8]| {
    let Some(codec) = codec() else { return };

    // Default encoding
    let _ = codec.deserialize(data);

    // Surrogate handling in UTF-16 text
    let _ = codec.deserialize_with(data, TextEncoding::Utf16Le);
});
