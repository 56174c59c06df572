// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-layout codec.
//!
//! Wire format: `[member]*` with no header, no generation gating and no
//! null markers. Suited to layouts agreed in advance, such as mirrors of
//! native structures; any change to the type changes the layout.

use std::any::Any;
use std::io::{Read, Write};
use std::marker::PhantomData;

use super::{impl_typed_codec, CodecCore, ObjectCodec};
use crate::catalog::ConverterCatalog;
use crate::config::{CodecConfig, Mode};
use crate::error::{Error, Result};
use crate::plan::TypePlan;
use crate::shape::Binary;
use crate::text::TextEncoding;

/// Densest encoding of `T`; `Option` members must hold a value.
pub struct UnsafeCodec<T> {
    core: CodecCore,
    _marker: PhantomData<fn() -> T>,
}

impl_typed_codec!(UnsafeCodec, Mode::Unsafe);
