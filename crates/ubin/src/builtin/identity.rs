// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-layout converters for GUIDs, decimals and version numbers.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::VERSION_COMPONENT_ABSENT;
use crate::convert::ValueConverter;
use crate::error::{Error, Result};
use crate::ser::{Reader, Writer};
use crate::version::Version;

const DECIMAL_SIGN_MASK: u32 = 0x8000_0000;
const DECIMAL_SCALE_SHIFT: u32 = 16;
const DECIMAL_SCALE_MASK: u32 = 0x00FF_0000;
const DECIMAL_MAX_SCALE: u32 = 28;

/// 16 bytes in RFC 4122 order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidConverter;

impl ValueConverter<Uuid> for GuidConverter {
    fn write(&self, value: &Uuid, w: &mut Writer<'_>) -> Result<()> {
        w.write_bytes(value.as_bytes());
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<Uuid> {
        let mut bytes = [0u8; 16];
        for byte in &mut bytes {
            *byte = r.read_u8()?;
        }
        Ok(Uuid::from_bytes(bytes))
    }
}

/// 96-bit mantissa as lo/mid/hi words, then a flags word holding scale and sign.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecimalConverter;

impl ValueConverter<Decimal> for DecimalConverter {
    fn write(&self, value: &Decimal, w: &mut Writer<'_>) -> Result<()> {
        let mantissa = value.mantissa().unsigned_abs();
        let mut flags = value.scale() << DECIMAL_SCALE_SHIFT;
        if value.is_sign_negative() {
            flags |= DECIMAL_SIGN_MASK;
        }
        w.write_u32(mantissa as u32);
        w.write_u32((mantissa >> 32) as u32);
        w.write_u32((mantissa >> 64) as u32);
        w.write_u32(flags);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<Decimal> {
        let lo = r.read_u32()?;
        let mid = r.read_u32()?;
        let hi = r.read_u32()?;
        let flags = r.read_u32()?;
        let scale = (flags & DECIMAL_SCALE_MASK) >> DECIMAL_SCALE_SHIFT;
        if flags & !(DECIMAL_SIGN_MASK | DECIMAL_SCALE_MASK) != 0 || scale > DECIMAL_MAX_SCALE {
            return Err(r.invalid("decimal", format!("flags {flags:#010x}")));
        }
        Ok(Decimal::from_parts(
            lo,
            mid,
            hi,
            flags & DECIMAL_SIGN_MASK != 0,
            scale,
        ))
    }
}

/// Four i32 components; omitted build/revision are written as -1.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionConverter;

fn component(value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::invalid_value(format!("version component {value} exceeds i32::MAX")))
}

impl ValueConverter<Version> for VersionConverter {
    fn write(&self, value: &Version, w: &mut Writer<'_>) -> Result<()> {
        w.write_i32(component(value.major())?);
        w.write_i32(component(value.minor())?);
        w.write_i32(value.build().map(component).transpose()?.unwrap_or(VERSION_COMPONENT_ABSENT));
        w.write_i32(
            value
                .revision()
                .map(component)
                .transpose()?
                .unwrap_or(VERSION_COMPONENT_ABSENT),
        );
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<Version> {
        let parts = [r.read_i32()?, r.read_i32()?, r.read_i32()?, r.read_i32()?];
        let [major, minor, build, revision] = parts.map(|part| u32::try_from(part).ok());
        let (Some(major), Some(minor)) = (major, minor) else {
            return Err(r.invalid("version", format!("negative component in {parts:?}")));
        };
        Ok(match (build, revision) {
            (None, None) => Version::new(major, minor),
            (Some(build), None) => Version::new(major, minor).with_build(build),
            (Some(build), Some(revision)) => Version::new(major, minor)
                .with_build(build)
                .with_revision(revision),
            (None, Some(_)) => {
                return Err(r.invalid("version", format!("revision without build in {parts:?}")))
            }
        })
    }
}
