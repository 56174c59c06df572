// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type plans: the compiled member -> converter table of one complex type.
//!
//! A plan is built once per type and codec instance by [`PlanBuilder`] and
//! never changes afterwards. Nested complex types get their own plan,
//! shared through the codec's catalog.

mod bindings;
mod builder;


use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::convert::{Converter, MemberInfo};
use crate::error::{Error, Result};
use crate::ser::{Reader, Writer};
use crate::shape::Accessor;

pub(crate) use builder::PlanBuilder;

/// One member paired with its resolved converter.
pub struct MemberBinding {
    info: MemberInfo,
    converter: Arc<dyn Converter>,
    access: Arc<dyn Accessor>,
}

impl MemberBinding {
    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    pub fn converter(&self) -> &Arc<dyn Converter> {
        &self.converter
    }

    fn active_in(&self, generation: Option<u16>) -> bool {
        generation.map_or(true, |g| self.info.generation <= g)
    }
}

/// Ordered binding table of one complex type.
pub struct TypePlan {
    type_name: &'static str,
    bindings: Vec<MemberBinding>,
    latest_generation: u16,
    construct: fn() -> Box<dyn Any>,
}

impl TypePlan {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Bindings in ascending ordinal order, which is the wire order.
    pub fn bindings(&self) -> &[MemberBinding] {
        &self.bindings
    }

    /// Highest generation across this plan and every nested plan.
    pub fn latest_generation(&self) -> u16 {
        self.latest_generation
    }

    /// Write every member active in the writer's generation.
    pub(crate) fn write_members(&self, value: &dyn Any, w: &mut Writer<'_>) -> Result<()> {
        let generation = w.generation();
        for binding in self.bindings.iter().filter(|b| b.active_in(generation)) {
            let field = binding
                .access
                .get(value)
                .ok_or(Error::TypeMismatch {
                    expected: self.type_name,
                })?;
            binding
                .converter
                .write(&binding.info, field, w)
                .map_err(|e| e.in_member(binding.info.name))?;
        }
        Ok(())
    }

    /// Read members active in the reader's generation into a default value.
    ///
    /// Members newer than the payload keep their default.
    pub(crate) fn read_members(&self, r: &mut Reader<'_>) -> Result<Box<dyn Any>> {
        let generation = r.generation();
        let mut target = (self.construct)();
        for binding in &self.bindings {
            if !binding.active_in(generation) {
                log::trace!(
                    "[plan] {}::{} absent from generation {:?}, keeping default",
                    self.type_name,
                    binding.info.name,
                    generation
                );
                continue;
            }
            let value = binding.converter.read(&binding.info, r)?;
            if !binding.access.set(target.as_mut(), value) {
                return Err(Error::TypeMismatch {
                    expected: binding.converter.target(),
                });
            }
        }
        Ok(target)
    }
}

impl fmt::Debug for TypePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<_> = self
            .bindings
            .iter()
            .map(|b| (b.info.ordinal, b.info.name, b.info.generation))
            .collect();
        f.debug_struct("TypePlan")
            .field("type_name", &self.type_name)
            .field("latest_generation", &self.latest_generation)
            .field("members", &members)
            .finish()
    }
}
