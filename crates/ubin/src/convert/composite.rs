// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converters synthesized by the plan builder around inner converters.

use std::any::Any;
use std::sync::Arc;

use super::{Converter, MemberInfo};
use crate::config::Mode;
use crate::error::{DataError, Error, Result};
use crate::plan::TypePlan;
use crate::shape::{EnumAccess, OptionalAccess, SequenceAccess};
use crate::ser::{Reader, Writer};

// ============================================================================
// Arrays and lists
// ============================================================================

/// `[count: i32][element]*` framing around an element converter.
pub(crate) struct SequenceConverter {
    target: &'static str,
    access: Arc<dyn SequenceAccess>,
    element: Arc<dyn Converter>,
    mode: Mode,
}

impl SequenceConverter {
    pub(crate) fn new(
        target: &'static str,
        access: Arc<dyn SequenceAccess>,
        element: Arc<dyn Converter>,
        mode: Mode,
    ) -> Self {
        Self {
            target,
            access,
            element,
            mode,
        }
    }

    fn read_items(
        &self,
        member: &MemberInfo,
        count: usize,
        r: &mut Reader<'_>,
    ) -> Result<Box<dyn Any>> {
        if self.access.fixed_len().is_some_and(|len| len != count) {
            return Err(DataError::InvalidCount {
                count: count as i64,
                offset: r.offset(),
            }
            .into());
        }
        let mut items = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            items.push(self.element.read(member, r)?);
        }
        let offset = r.offset();
        self.access.collect(items)?.ok_or_else(|| {
            DataError::InvalidCount {
                count: count as i64,
                offset,
            }
            .into()
        })
    }
}

impl Converter for SequenceConverter {
    fn target(&self) -> &'static str {
        self.target
    }

    fn write(&self, member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        w.write_count(self.access.len(value)?)?;
        self.access
            .visit(value, &mut |item| self.element.write(member, item, w))
    }

    fn read(&self, member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        match r.read_count()? {
            Some(count) => self.read_items(member, count, r),
            None if self.mode.is_versioned() => Err(DataError::UnexpectedNull {
                member: member.name.to_string(),
            }
            .into()),
            None => Err(DataError::InvalidCount {
                count: -1,
                offset: r.offset(),
            }
            .into()),
        }
    }

    /// Null collections use the count sentinel instead of a presence flag.
    fn write_nullable(
        &self,
        member: &MemberInfo,
        value: Option<&dyn Any>,
        w: &mut Writer<'_>,
    ) -> Result<()> {
        match value {
            Some(value) => self.write(member, value, w),
            None => {
                w.write_null_count();
                Ok(())
            }
        }
    }

    fn read_nullable(
        &self,
        member: &MemberInfo,
        r: &mut Reader<'_>,
    ) -> Result<Option<Box<dyn Any>>> {
        match r.read_count()? {
            Some(count) => self.read_items(member, count, r).map(Some),
            None => Ok(None),
        }
    }

    fn latest_generation(&self) -> u16 {
        self.element.latest_generation()
    }
}

// ============================================================================
// Optional values
// ============================================================================

/// Presence handling for `Option<T>` members.
///
/// Safe mode: a presence marker unless the member is required, in which case
/// `None` is a value error. Unsafe mode: no marker, `None` is a value error.
///
/// `Option<T>` is the only source of a presence marker. Strings, URLs and
/// nested structs declared without `Option` are always written as values.
/// Collection elements see the owning member's `required` flag, so the
/// elements of a `Vec<Option<T>>` are flagged exactly when the member is.
pub(crate) struct NullableConverter {
    target: &'static str,
    access: Arc<dyn OptionalAccess>,
    inner: Arc<dyn Converter>,
    mode: Mode,
}

impl NullableConverter {
    pub(crate) fn new(
        target: &'static str,
        access: Arc<dyn OptionalAccess>,
        inner: Arc<dyn Converter>,
        mode: Mode,
    ) -> Self {
        Self {
            target,
            access,
            inner,
            mode,
        }
    }

    fn flagged(&self, member: &MemberInfo) -> bool {
        self.mode.is_versioned() && !member.required
    }
}

impl Converter for NullableConverter {
    fn target(&self) -> &'static str {
        self.target
    }

    fn write(&self, member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        let value = self.access.project(value)?;
        if self.flagged(member) {
            return self.inner.write_nullable(member, value, w);
        }
        match value {
            Some(value) => self.inner.write(member, value, w),
            None if self.mode.is_versioned() => {
                Err(Error::member_value(member.name, "required member has no value"))
            }
            None => Err(Error::member_value(
                member.name,
                "fixed layouts cannot encode an absent value",
            )),
        }
    }

    fn read(&self, member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        let value = if self.flagged(member) {
            self.inner.read_nullable(member, r)?
        } else {
            Some(self.inner.read(member, r)?)
        };
        self.access.wrap(value)
    }

    fn latest_generation(&self) -> u16 {
        self.inner.latest_generation()
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Enumeration written as its underlying integer.
pub(crate) struct EnumConverter {
    target: &'static str,
    access: Arc<dyn EnumAccess>,
    underlying: Arc<dyn Converter>,
}

impl EnumConverter {
    pub(crate) fn new(
        target: &'static str,
        access: Arc<dyn EnumAccess>,
        underlying: Arc<dyn Converter>,
    ) -> Self {
        Self {
            target,
            access,
            underlying,
        }
    }
}

impl Converter for EnumConverter {
    fn target(&self) -> &'static str {
        self.target
    }

    fn write(&self, member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        let raw = self.access.to_underlying(value)?;
        self.underlying.write(member, raw.as_ref(), w)
    }

    fn read(&self, member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        let raw = self.underlying.read(member, r)?;
        self.access
            .from_underlying(raw)?
            .map_err(|reason| r.invalid("enum discriminant", reason))
    }
}

// ============================================================================
// Nested plans
// ============================================================================

/// Delegates to the nested plan of a complex member type.
pub(crate) struct PlanConverter {
    plan: Arc<TypePlan>,
}

impl PlanConverter {
    pub(crate) fn new(plan: Arc<TypePlan>) -> Self {
        Self { plan }
    }
}

impl Converter for PlanConverter {
    fn target(&self) -> &'static str {
        self.plan.type_name()
    }

    fn write(&self, _member: &MemberInfo, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        self.plan.write_members(value, w)
    }

    fn read(&self, _member: &MemberInfo, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        self.plan.read_members(r)
    }

    fn latest_generation(&self) -> u16 {
        self.plan.latest_generation()
    }
}
