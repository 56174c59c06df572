// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Character encodings for string and char members.
//!
//! The encoding is independent of the binary framing: the same plan can
//! write UTF-8 or UTF-16 text, selected per codec or per call.

use std::fmt;
use std::str::FromStr;

/// Replacement byte for characters a single-byte encoding cannot represent.
const REPLACEMENT: u8 = b'?';

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8.
    Utf8,
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// 7-bit ASCII; other characters become `?`.
    Ascii,
    /// ISO-8859-1; characters above U+00FF become `?`.
    Latin1,
}

impl TextEncoding {
    /// Windows code page identifier, used as the wire form of an encoding.
    pub const fn code_page(self) -> i32 {
        match self {
            Self::Utf8 => 65001,
            Self::Utf16Le => 1200,
            Self::Ascii => 20127,
            Self::Latin1 => 28591,
        }
    }

    /// Inverse of [`code_page`](Self::code_page).
    pub const fn from_code_page(code_page: i32) -> Option<Self> {
        match code_page {
            65001 => Some(Self::Utf8),
            1200 => Some(Self::Utf16Le),
            20127 => Some(Self::Ascii),
            28591 => Some(Self::Latin1),
            _ => None,
        }
    }

    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { REPLACEMENT })
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT))
                .collect(),
        }
    }

    /// Decode `bytes`; the error string describes the first invalid sequence.
    pub fn decode(self, bytes: &[u8]) -> Result<String, String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string()),
            Self::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(format!("odd UTF-16 byte length {}", bytes.len()));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| e.to_string())
            }
            Self::Ascii => Ok(bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
                .collect()),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encoded form of a single character.
    pub fn encode_char(self, c: char) -> Vec<u8> {
        let mut buf = [0u8; 4];
        self.encode(c.encode_utf8(&mut buf))
    }

    /// Number of bytes a character occupies, given its first code unit.
    ///
    /// Returns `None` for a byte that cannot start a character.
    pub(crate) fn char_width(self, lead: &[u8]) -> Option<usize> {
        match self {
            Self::Ascii | Self::Latin1 => Some(1),
            Self::Utf8 => match lead.first()? {
                0x00..=0x7F => Some(1),
                0xC2..=0xDF => Some(2),
                0xE0..=0xEF => Some(3),
                0xF0..=0xF4 => Some(4),
                _ => None,
            },
            Self::Utf16Le => {
                let unit = u16::from_le_bytes([*lead.first()?, *lead.get(1)?]);
                if (0xD800..0xDC00).contains(&unit) {
                    Some(4)
                } else {
                    Some(2)
                }
            }
        }
    }

    /// Bytes needed to determine [`char_width`](Self::char_width).
    pub(crate) const fn lead_len(self) -> usize {
        match self {
            Self::Utf16Le => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
        })
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16" | "utf-16le" | "utf16" | "unicode" => Ok(Self::Utf16Le),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(format!("unknown text encoding '{other}'")),
        }
    }
}
