// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in converter table.
//!
//! | Type | Layout |
//! |------|--------|
//! | integers, `f32`, `f64` | fixed-width little-endian |
//! | `bool` | one byte, 0 or 1 |
//! | `char` | one character in the active text encoding |
//! | `String`, `Url` | 7-bit length prefix + encoded bytes |
//! | `Decimal` | lo, mid, hi, flags (4 x u32) |
//! | `NaiveDateTime`, `TimeDelta` | i64 ticks of 100 ns |
//! | `DateTime<FixedOffset>` | i64 local ticks + i64 offset ticks |
//! | `Uuid` | 16 bytes |
//! | `Version` | 4 x i32, -1 for omitted parts |
//! | `TextEncoding` | i32 code page |
//!
//! The table is the same for both codec modes; null markers are added by
//! the nullable and collection converters, never by a built-in.

mod identity;
mod numeric;
mod temporal;
mod text;

pub use identity::{DecimalConverter, GuidConverter, VersionConverter};
pub use numeric::{
    BoolConverter, F32Converter, F64Converter, I16Converter, I32Converter, I64Converter,
    I8Converter, U16Converter, U32Converter, U64Converter, U8Converter,
};
pub use temporal::{DateTimeConverter, DateTimeOffsetConverter, TimeSpanConverter};
pub use text::{CharConverter, StringConverter, TextEncodingConverter, UrlConverter};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::catalog::ConverterCatalog;
use crate::text::TextEncoding;
use crate::version::Version;

/// Register every built-in converter.
pub(crate) fn seed(catalog: &mut ConverterCatalog) {
    catalog.insert::<u8, _>(U8Converter);
    catalog.insert::<i8, _>(I8Converter);
    catalog.insert::<u16, _>(U16Converter);
    catalog.insert::<i16, _>(I16Converter);
    catalog.insert::<u32, _>(U32Converter);
    catalog.insert::<i32, _>(I32Converter);
    catalog.insert::<u64, _>(U64Converter);
    catalog.insert::<i64, _>(I64Converter);
    catalog.insert::<f32, _>(F32Converter);
    catalog.insert::<f64, _>(F64Converter);
    catalog.insert::<bool, _>(BoolConverter);
    catalog.insert::<char, _>(CharConverter);
    catalog.insert::<String, _>(StringConverter);
    catalog.insert::<Url, _>(UrlConverter);
    catalog.insert::<TextEncoding, _>(TextEncodingConverter);
    catalog.insert::<Decimal, _>(DecimalConverter);
    catalog.insert::<NaiveDateTime, _>(DateTimeConverter);
    catalog.insert::<TimeDelta, _>(TimeSpanConverter);
    catalog.insert::<DateTime<FixedOffset>, _>(DateTimeOffsetConverter);
    catalog.insert::<Uuid, _>(GuidConverter);
    catalog.insert::<Version, _>(VersionConverter);
}
