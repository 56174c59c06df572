// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Versioned codec.
//!
//! Wire format: `[generation: u16 LE][member]*`, members in ordinal order.
//! A payload is readable by any plan whose latest generation is at least
//! the payload's; members introduced later keep their default value. A
//! payload from a newer plan is rejected with [`Error::Compatibility`].

use std::any::Any;
use std::io::{Read, Write};
use std::marker::PhantomData;

use super::{impl_typed_codec, CodecCore, ObjectCodec};
use crate::catalog::ConverterCatalog;
use crate::config::{CodecConfig, Mode, GENERATION_HEADER_SIZE};
use crate::error::{DataError, Error, Result};
use crate::plan::TypePlan;
use crate::shape::Binary;
use crate::text::TextEncoding;

/// Versioned, null-aware codec for `T`.
///
/// ```
/// use ubin::{Binary, SafeCodec};
///
/// #[derive(Debug, Default, PartialEq, Binary)]
/// struct Stats {
///     #[bin(index = 0)]
///     health: i32,
///     #[bin(index = 1, generation = 2)]
///     hunger: i32,
/// }
///
/// let codec = SafeCodec::<Stats>::new()?;
/// let bytes = codec.serialize(&Stats { health: 23, hunger: 234 })?;
/// assert_eq!(bytes, [0x02, 0x00, 23, 0, 0, 0, 234, 0, 0, 0]);
/// assert_eq!(codec.deserialize(&bytes)?, Stats { health: 23, hunger: 234 });
/// # Ok::<(), ubin::Error>(())
/// ```
pub struct SafeCodec<T> {
    core: CodecCore,
    _marker: PhantomData<fn() -> T>,
}

impl_typed_codec!(SafeCodec, Mode::Safe);

impl<T: Binary> SafeCodec<T> {
    /// Generation written into every header by this codec.
    pub fn latest_generation(&self) -> u16 {
        self.core.plan.latest_generation()
    }

    /// Generation recorded in a payload header, without decoding the body.
    pub fn peek_generation(bytes: &[u8]) -> Result<u16> {
        match bytes.get(..GENERATION_HEADER_SIZE) {
            Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
            _ => Err(DataError::UnexpectedEof {
                offset: 0,
                needed: GENERATION_HEADER_SIZE,
            }
            .into()),
        }
    }
}
