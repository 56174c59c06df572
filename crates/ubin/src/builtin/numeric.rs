// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width numeric and boolean converters.

use crate::convert::ValueConverter;
use crate::error::Result;
use crate::ser::{Reader, Writer};

macro_rules! impl_fixed_converter {
    ($(#[$doc:meta])* $conv:ident, $type:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $conv;

        impl ValueConverter<$type> for $conv {
            fn write(&self, value: &$type, w: &mut Writer<'_>) -> Result<()> {
                w.$write(*value);
                Ok(())
            }

            fn read(&self, r: &mut Reader<'_>) -> Result<$type> {
                r.$read()
            }
        }
    };
}

impl_fixed_converter!(U8Converter, u8, write_u8, read_u8);
impl_fixed_converter!(I8Converter, i8, write_i8, read_i8);
impl_fixed_converter!(U16Converter, u16, write_u16, read_u16);
impl_fixed_converter!(I16Converter, i16, write_i16, read_i16);
impl_fixed_converter!(U32Converter, u32, write_u32, read_u32);
impl_fixed_converter!(I32Converter, i32, write_i32, read_i32);
impl_fixed_converter!(U64Converter, u64, write_u64, read_u64);
impl_fixed_converter!(I64Converter, i64, write_i64, read_i64);
impl_fixed_converter!(F32Converter, f32, write_f32, read_f32);
impl_fixed_converter!(F64Converter, f64, write_f64, read_f64);
impl_fixed_converter!(
    /// One byte, strictly 0 or 1.
    BoolConverter,
    bool,
    write_bool,
    read_bool
);
