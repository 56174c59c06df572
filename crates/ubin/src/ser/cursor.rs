// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte writer and reader shared by every converter.
//!
//! Both carry the per-call context converters need: the active text
//! encoding and, in Safe mode, the generation being written or read.

use std::io::{self, Read};

use crate::config::{CodecConfig, NULL_COLLECTION_SENTINEL};
use crate::error::{DataError, Error, Result};
use crate::text::TextEncoding;

/// Longest 7-bit encoded length accepted (enough for a `u32`).
const MAX_VARINT_BYTES: usize = 5;

/// Initial buffer size for length-prefixed reads.
const READ_CHUNK: usize = 4096;

/// Generate little-endian write methods for primitive types.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate little-endian read methods for primitive types.
///
/// Each generated method fills a fixed array from the source, mapping a
/// premature end of data to `DataError::UnexpectedEof`.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            self.fill(&mut bytes)?;
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Append-only writer over a caller-owned buffer.
pub struct Writer<'a> {
    buffer: &'a mut Vec<u8>,
    encoding: TextEncoding,
    generation: Option<u16>,
}

impl<'a> Writer<'a> {
    /// `generation` is `Some` for Safe payloads and `None` for Unsafe ones.
    pub fn new(buffer: &'a mut Vec<u8>, encoding: TextEncoding, generation: Option<u16>) -> Self {
        Self {
            buffer,
            encoding,
            generation,
        }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_u16, u16);
    impl_write_le!(write_i16, i16);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_f32, f32);
    impl_write_le!(write_f64, f64);

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write a length as a 7-bit variable-length integer.
    pub fn write_varint(&mut self, value: u32) {
        let mut rest = value;
        while rest >= 0x80 {
            self.buffer.push((rest as u8) | 0x80);
            rest >>= 7;
        }
        self.buffer.push(rest as u8);
    }

    /// Write a collection count; fails if it does not fit an `i32`.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = i32::try_from(count)
            .map_err(|_| Error::invalid_value(format!("{count} elements exceed i32::MAX")))?;
        self.write_i32(count);
        Ok(())
    }

    /// Write the null collection marker.
    pub fn write_null_count(&mut self) {
        self.write_i32(NULL_COLLECTION_SENTINEL);
    }

    /// Write length-prefixed text in the active encoding.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let bytes = self.encoding.encode(text);
        let len = u32::try_from(bytes.len())
            .map_err(|_| Error::invalid_value("string longer than u32::MAX bytes"))?;
        self.write_varint(len);
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Write one character in the active encoding, without a length.
    pub fn write_char(&mut self, c: char) {
        let bytes = self.encoding.encode_char(c);
        self.write_bytes(&bytes);
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Generation of the payload being written, `None` in Unsafe mode.
    pub fn generation(&self) -> Option<u16> {
        self.generation
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }
}

/// Forward-only reader over any byte source.
pub struct Reader<'a> {
    source: &'a mut dyn Read,
    offset: usize,
    generation: Option<u16>,
    config: CodecConfig,
}

impl<'a> Reader<'a> {
    /// `config.encoding` is the text encoding used for this read.
    pub fn new(source: &'a mut dyn Read, config: CodecConfig) -> Self {
        Self {
            source,
            offset: 0,
            generation: None,
            config,
        }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_i16, i16, 2);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i64, i64, 8);
    impl_read_le!(read_f32, f32, 4);
    impl_read_le!(read_f64, f64, 8);

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.invalid("bool", format!("byte {other:#04x} is neither 0 nor 1"))),
        }
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a corrupt length
    /// cannot force a large allocation.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len.min(READ_CHUNK));
        let read = (&mut *self.source)
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(Error::Io)?;
        if read < len {
            return Err(DataError::UnexpectedEof {
                offset: self.offset + read,
                needed: len - read,
            }
            .into());
        }
        self.offset += read;
        Ok(bytes)
    }

    /// Read a 7-bit variable-length integer.
    pub fn read_varint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for index in 0..MAX_VARINT_BYTES {
            let byte = self.read_u8()?;
            let chunk = u32::from(byte & 0x7F);
            if index == MAX_VARINT_BYTES - 1 && chunk > 0x0F {
                return Err(self.invalid("length prefix", "varint overflows u32".to_string()));
            }
            value |= chunk << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(self.invalid("length prefix", "varint longer than 5 bytes".to_string()))
    }

    /// Read a collection count.
    ///
    /// Returns `None` for the null sentinel; other negative counts and
    /// counts above the configured limit are rejected.
    pub fn read_count(&mut self) -> Result<Option<usize>> {
        let count = self.read_i32()?;
        if count == NULL_COLLECTION_SENTINEL {
            return Ok(None);
        }
        match usize::try_from(count) {
            Ok(len) if len <= self.config.max_collection_len => Ok(Some(len)),
            _ => Err(DataError::InvalidCount {
                count: i64::from(count),
                offset: self.offset,
            }
            .into()),
        }
    }

    /// Read length-prefixed text in the active encoding.
    pub fn read_str(&mut self) -> Result<String> {
        let len = self.read_varint()? as usize;
        if len > self.config.max_text_bytes {
            return Err(self.invalid(
                "string length",
                format!("{len} bytes exceeds limit of {}", self.config.max_text_bytes),
            ));
        }
        let bytes = self.read_bytes(len)?;
        self.config
            .encoding
            .decode(&bytes)
            .map_err(|reason| self.invalid("string", reason))
    }

    /// Read one character in the active encoding.
    pub fn read_char(&mut self) -> Result<char> {
        let encoding = self.config.encoding;
        let mut bytes = self.read_bytes(encoding.lead_len())?;
        let width = encoding
            .char_width(&bytes)
            .ok_or_else(|| self.invalid("char", "invalid lead byte".to_string()))?;
        if width > bytes.len() {
            let rest = self.read_bytes(width - bytes.len())?;
            bytes.extend_from_slice(&rest);
        }
        let text = encoding
            .decode(&bytes)
            .map_err(|reason| self.invalid("char", reason))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.invalid("char", "not a single character".to_string())),
        }
    }

    /// Build a `DataError::InvalidValue` at the current offset.
    pub fn invalid(&self, what: &'static str, reason: String) -> Error {
        DataError::InvalidValue {
            what,
            offset: self.offset,
            reason,
        }
        .into()
    }

    pub fn encoding(&self) -> TextEncoding {
        self.config.encoding
    }

    /// Generation of the payload being read, `None` in Unsafe mode.
    pub fn generation(&self) -> Option<u16> {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u16) {
        self.generation = Some(generation);
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.source.read_exact(buf) {
            Ok(()) => {
                self.offset += buf.len();
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(DataError::UnexpectedEof {
                offset: self.offset,
                needed: buf.len(),
            }
            .into()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_over<'a>(src: &'a mut &[u8]) -> Reader<'a> {
        Reader::new(src, CodecConfig::default())
    }

    #[test]
    fn primitives_are_little_endian() {
        let mut buf = Vec::new();
        let mut w = Writer::new(&mut buf, TextEncoding::Utf8, None);
        w.write_u16(0x0102);
        w.write_i32(-2);
        w.write_f64(1.5);
        assert_eq!(&buf[..6], &[0x02, 0x01, 0xFE, 0xFF, 0xFF, 0xFF]);

        let mut src = buf.as_slice();
        let mut r = reader_over(&mut src);
        assert_eq!(r.read_u16().expect("read_u16 should succeed"), 0x0102);
        assert_eq!(r.read_i32().expect("read_i32 should succeed"), -2);
        assert_eq!(r.read_f64().expect("read_f64 should succeed"), 1.5);
        assert_eq!(r.offset(), 14);
    }

    #[test]
    fn varint_matches_7bit_layout() {
        let mut buf = Vec::new();
        let mut w = Writer::new(&mut buf, TextEncoding::Utf8, None);
        w.write_varint(300);
        w.write_varint(u32::MAX);
        assert_eq!(&buf[..2], &[0xAC, 0x02]);

        let mut src = buf.as_slice();
        let mut r = reader_over(&mut src);
        assert_eq!(r.read_varint().expect("short varint"), 300);
        assert_eq!(r.read_varint().expect("long varint"), u32::MAX);
    }

    #[test]
    fn overlong_varint_is_data_error() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut src = &bytes[..];
        let err = reader_over(&mut src).read_varint().unwrap_err();
        assert!(matches!(err, Error::Data(DataError::InvalidValue { what: "length prefix", .. })));
    }

    #[test]
    fn short_source_reports_offset() {
        let bytes = [1u8, 0, 0];
        let mut src = &bytes[..];
        let mut r = reader_over(&mut src);
        assert_eq!(r.read_u8().expect("first byte"), 1);
        let err = r.read_i32().unwrap_err();
        assert!(matches!(
            err,
            Error::Data(DataError::UnexpectedEof { offset: 1, needed: 4 })
        ));
    }

    #[test]
    fn short_byte_run_reports_missing_tail() {
        let bytes = [7u8, 8, 9];
        let mut src = &bytes[..];
        let err = reader_over(&mut src).read_bytes(1 << 20).unwrap_err();
        assert!(matches!(
            err,
            Error::Data(DataError::UnexpectedEof { offset: 3, needed }) if needed == (1 << 20) - 3
        ));
    }

    #[test]
    fn count_sentinel_and_limits() {
        let mut buf = Vec::new();
        let mut w = Writer::new(&mut buf, TextEncoding::Utf8, None);
        w.write_null_count();
        w.write_i32(-7);
        w.write_i32(3);
        w.write_i32(4);

        let mut src = buf.as_slice();
        let mut r = Reader::new(&mut src, CodecConfig::default().with_max_collection_len(3));
        assert_eq!(r.read_count().expect("sentinel"), None);
        assert!(matches!(
            r.read_count(),
            Err(Error::Data(DataError::InvalidCount { count: -7, .. }))
        ));
        assert_eq!(r.read_count().expect("within limit"), Some(3));
        assert!(matches!(
            r.read_count(),
            Err(Error::Data(DataError::InvalidCount { count: 4, .. }))
        ));
    }

    #[test]
    fn strings_and_chars_follow_encoding() {
        for encoding in [TextEncoding::Utf8, TextEncoding::Utf16Le] {
            let mut buf = Vec::new();
            let mut w = Writer::new(&mut buf, encoding, None);
            w.write_str("héllo").expect("write_str should succeed");
            w.write_char('€');
            w.write_char('𝄞');

            let mut src = buf.as_slice();
            let mut r = Reader::new(&mut src, CodecConfig::default().with_encoding(encoding));
            assert_eq!(r.read_str().expect("read_str"), "héllo");
            assert_eq!(r.read_char().expect("bmp char"), '€');
            assert_eq!(r.read_char().expect("astral char"), '𝄞');
        }
    }

    #[test]
    fn oversized_string_is_rejected_before_allocation() {
        let mut buf = Vec::new();
        Writer::new(&mut buf, TextEncoding::Utf8, None).write_varint(1_000_000);
        let mut src = buf.as_slice();
        let mut r = Reader::new(&mut src, CodecConfig::default().with_max_text_bytes(16));
        assert!(matches!(
            r.read_str(),
            Err(Error::Data(DataError::InvalidValue { what: "string length", .. }))
        ));
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let bytes = [0u8, 1, 2];
        let mut src = &bytes[..];
        let mut r = reader_over(&mut src);
        assert!(!r.read_bool().expect("false"));
        assert!(r.read_bool().expect("true"));
        assert!(r.read_bool().is_err());
    }
}
