// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converters: bidirectional value <-> bytes capabilities for one type.
//!
//! Plans hold erased [`Converter`] trait objects so that a single binding
//! table can mix built-in, composite, plan-backed and user converters.
//! Users normally implement the typed [`ValueConverter`] and hand it to
//! [`erase`].

mod composite;

use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ser::{Reader, Writer};

pub(crate) use composite::{EnumConverter, NullableConverter, PlanConverter, SequenceConverter};

/// Static description of the member a converter is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub(crate) name: &'static str,
    pub(crate) owner: &'static str,
    pub(crate) ordinal: i32,
    pub(crate) generation: u16,
    pub(crate) required: bool,
}

impl MemberInfo {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type declaring the member.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Wire position of the member within its owner.
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    /// First generation in which the member is present.
    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// Whether absence of a value is an error rather than an encoded null.
    pub fn required(&self) -> bool {
        self.required
    }
}

/// Erased converter bound to exactly one type identity.
///
/// Values cross this boundary as `&dyn Any` / `Box<dyn Any>`; a value of
/// the wrong type yields [`Error::TypeMismatch`].
pub trait Converter: Send + Sync {
    /// Name of the type this converter handles.
    fn target(&self) -> &'static str;

    fn write(&self, member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()>;

    fn read(&self, member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>>;

    /// Write a possibly-absent value behind a one-byte presence flag.
    fn write_nullable(
        &self,
        member: &MemberInfo,
        value: Option<&dyn Any>,
        w: &mut Writer<'_>,
    ) -> Result<()> {
        w.write_bool(value.is_some());
        match value {
            Some(value) => self.write(member, value, w),
            None => Ok(()),
        }
    }

    /// Counterpart of [`write_nullable`](Self::write_nullable).
    fn read_nullable(
        &self,
        member: &MemberInfo,
        r: &mut Reader<'_>,
    ) -> Result<Option<Box<dyn Any>>> {
        if r.read_bool()? {
            self.read(member, r).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Highest generation of any plan reachable through this converter.
    fn latest_generation(&self) -> u16 {
        0
    }
}

/// Typed converter for values of `T`.
pub trait ValueConverter<T>: Send + Sync + 'static {
    fn write(&self, value: &T, w: &mut Writer<'_>) -> Result<()>;

    fn read(&self, r: &mut Reader<'_>) -> Result<T>;
}

/// Adapter exposing a [`ValueConverter`] as an erased [`Converter`].
pub struct Typed<T, C> {
    inner: C,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Typed<T, C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: Any, C: ValueConverter<T>> Converter for Typed<T, C> {
    fn target(&self) -> &'static str {
        type_name::<T>()
    }

    fn write(&self, _member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        let value = value.downcast_ref::<T>().ok_or_else(Error::mismatch::<T>)?;
        self.inner.write(value, w)
    }

    fn read(&self, _member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        Ok(Box::new(self.inner.read(r)?))
    }
}

/// Erase a typed converter for registration in a catalog or override.
pub fn erase<T: Any, C: ValueConverter<T>>(converter: C) -> Arc<dyn Converter> {
    Arc::new(Typed::<T, C>::new(converter))
}
