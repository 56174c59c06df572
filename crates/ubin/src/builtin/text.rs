// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text-backed converters: strings, characters, URLs and encodings.

use url::Url;

use crate::convert::ValueConverter;
use crate::error::Result;
use crate::ser::{Reader, Writer};
use crate::text::TextEncoding;

/// 7-bit length prefix followed by the encoded bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl ValueConverter<String> for StringConverter {
    fn write(&self, value: &String, w: &mut Writer<'_>) -> Result<()> {
        w.write_str(value)
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<String> {
        r.read_str()
    }
}

/// One character in the active encoding, no length prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharConverter;

impl ValueConverter<char> for CharConverter {
    fn write(&self, value: &char, w: &mut Writer<'_>) -> Result<()> {
        w.write_char(*value);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<char> {
        r.read_char()
    }
}

/// URL in its serialized string form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlConverter;

impl ValueConverter<Url> for UrlConverter {
    fn write(&self, value: &Url, w: &mut Writer<'_>) -> Result<()> {
        w.write_str(value.as_str())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<Url> {
        let text = r.read_str()?;
        Url::parse(&text).map_err(|e| r.invalid("url", format!("'{text}': {e}")))
    }
}

/// Encoding as its i32 code page.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextEncodingConverter;

impl ValueConverter<TextEncoding> for TextEncodingConverter {
    fn write(&self, value: &TextEncoding, w: &mut Writer<'_>) -> Result<()> {
        w.write_i32(value.code_page());
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<TextEncoding> {
        let code_page = r.read_i32()?;
        TextEncoding::from_code_page(code_page)
            .ok_or_else(|| r.invalid("code page", format!("unsupported code page {code_page}")))
    }
}
