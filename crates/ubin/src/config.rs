// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and per-codec configuration.
//!
//! # Environment Variables
//!
//! [`CodecConfig::from_env`] reads:
//! - `UBIN_TEXT_ENCODING`: `utf-8`, `utf-16le`, `ascii` or `latin1` (default depends on mode)
//! - `UBIN_MAX_COLLECTION_LEN`: largest element count accepted on read (default: 16777216)
//! - `UBIN_MAX_TEXT_BYTES`: largest encoded string accepted on read (default: 16777216)

use crate::text::TextEncoding;

/// Size of the Safe mode generation header (u16, little-endian).
pub const GENERATION_HEADER_SIZE: usize = 2;

/// Collection count marking a null collection in Safe mode.
pub const NULL_COLLECTION_SENTINEL: i32 = -1;

/// Version component value marking an omitted build or revision.
pub const VERSION_COMPONENT_ABSENT: i32 = -1;

/// Default text encoding of [`Mode::Safe`] codecs.
pub const SAFE_DEFAULT_ENCODING: TextEncoding = TextEncoding::Utf8;

/// Default text encoding of [`Mode::Unsafe`] codecs.
pub const UNSAFE_DEFAULT_ENCODING: TextEncoding = TextEncoding::Ascii;

/// Default cap on a decoded element count (16 Mi elements).
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 16 * 1024 * 1024;

/// Default cap on a decoded string length in bytes (16 MiB).
pub const DEFAULT_MAX_TEXT_BYTES: usize = 16 * 1024 * 1024;

/// Codec flavour. Plans built for one mode are never shared with the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Generation header, member gating and null markers.
    Safe,
    /// No header, no gating, no null markers.
    Unsafe,
}

impl Mode {
    /// Whether payloads of this mode carry a generation header.
    pub const fn is_versioned(self) -> bool {
        matches!(self, Self::Safe)
    }
}

/// Runtime knobs of a codec instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Text encoding used when a call does not pick one.
    pub encoding: TextEncoding,
    /// Largest element count accepted while reading.
    pub max_collection_len: usize,
    /// Largest encoded string length accepted while reading.
    pub max_text_bytes: usize,
}

impl CodecConfig {
    /// Built-in defaults for `mode`, ignoring the environment.
    pub const fn for_mode(mode: Mode) -> Self {
        Self {
            encoding: match mode {
                Mode::Safe => SAFE_DEFAULT_ENCODING,
                Mode::Unsafe => UNSAFE_DEFAULT_ENCODING,
            },
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }

    /// Defaults for `mode`, overridden by `UBIN_*` environment variables.
    ///
    /// Unparsable values fall back to the built-in default.
    pub fn from_env(mode: Mode) -> Self {
        let defaults = Self::for_mode(mode);
        Self {
            encoding: std::env::var("UBIN_TEXT_ENCODING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.encoding),
            max_collection_len: std::env::var("UBIN_MAX_COLLECTION_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_collection_len),
            max_text_bytes: std::env::var("UBIN_MAX_TEXT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_text_bytes),
        }
    }

    /// Set the default text encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the element count limit.
    pub fn with_max_collection_len(mut self, limit: usize) -> Self {
        self.max_collection_len = limit;
        self
    }

    /// Set the string length limit.
    pub fn with_max_text_bytes(mut self, limit: usize) -> Self {
        self.max_text_bytes = limit;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::for_mode(Mode::Safe)
    }
}
