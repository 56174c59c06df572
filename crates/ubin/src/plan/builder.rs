// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive converter resolution.
//!
//! The builder owns the catalog for the duration of one construction pass
//! and memoizes every synthesized converter in it, so sibling members and
//! nested types reuse earlier work. A stack of plans under construction
//! detects self-referential schemas.

use std::any::TypeId;
use std::sync::Arc;

use super::bindings::resolve_members;
use super::{MemberBinding, TypePlan};
use crate::catalog::ConverterCatalog;
use crate::config::Mode;
use crate::convert::{
    Converter, EnumConverter, MemberInfo, NullableConverter, PlanConverter, SequenceConverter,
};
use crate::error::{Result, SchemaError};
use crate::shape::{EnumShape, SequenceShape, Shape, StructShape, TypeRef};

/// Single-use construction context for one codec instance.
pub(crate) struct PlanBuilder {
    mode: Mode,
    catalog: ConverterCatalog,
    stack: Vec<(TypeId, &'static str)>,
}

impl PlanBuilder {
    pub(crate) fn new(mode: Mode, catalog: ConverterCatalog) -> Self {
        Self {
            mode,
            catalog,
            stack: Vec::new(),
        }
    }

    /// Build the plan of `root` and hand back the populated catalog.
    pub(crate) fn build_root(
        mut self,
        root: TypeRef,
    ) -> Result<(Arc<TypePlan>, ConverterCatalog)> {
        let shape = match root.shape() {
            Shape::Struct(shape) if shape.construct.is_some() => shape,
            Shape::Struct(_) => {
                return Err(SchemaError::NotConstructible {
                    type_name: root.name(),
                }
                .into())
            }
            other => {
                return Err(SchemaError::UnsupportedRoot {
                    type_name: root.name(),
                    kind: other.kind(),
                }
                .into())
            }
        };
        let plan = self.build_plan(root, &shape)?;
        self.catalog
            .register(root.id(), Arc::new(PlanConverter::new(Arc::clone(&plan))));
        log::debug!(
            "[plan] {} ready ({:?} mode, {} member(s), latest generation {}, {} catalog entries)",
            plan.type_name(),
            self.mode,
            plan.bindings().len(),
            plan.latest_generation(),
            self.catalog.len()
        );
        Ok((plan, self.catalog))
    }

    fn build_plan(&mut self, ty: TypeRef, shape: &StructShape) -> Result<Arc<TypePlan>> {
        if self.stack.iter().any(|(id, _)| *id == ty.id()) {
            let path = self
                .stack
                .iter()
                .map(|(_, name)| *name)
                .chain(std::iter::once(ty.name()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(SchemaError::RecursiveType {
                type_name: ty.name(),
                path,
            }
            .into());
        }
        let construct = shape.construct.ok_or(SchemaError::NotConstructible {
            type_name: ty.name(),
        })?;
        let members = resolve_members(ty.name(), shape)?;

        self.stack.push((ty.id(), ty.name()));
        let bindings = members
            .into_iter()
            .map(|member| {
                log::trace!(
                    "[plan] {}::{} -> {} (ordinal {}, generation {})",
                    ty.name(),
                    member.decl.name,
                    member.decl.ty.name(),
                    member.ordinal,
                    member.generation
                );
                let converter = self.resolve(member.decl.ty)?;
                Ok(MemberBinding {
                    info: MemberInfo {
                        name: member.decl.name,
                        owner: ty.name(),
                        ordinal: member.ordinal,
                        generation: member.generation,
                        required: member.decl.required,
                    },
                    converter,
                    access: member.decl.access,
                })
            })
            .collect::<Result<Vec<_>>>();
        self.stack.pop();
        let bindings = bindings?;

        let latest_generation = bindings
            .iter()
            .map(|b| b.info.generation.max(b.converter.latest_generation()))
            .max()
            .unwrap_or(0);

        Ok(Arc::new(TypePlan {
            type_name: ty.name(),
            bindings,
            latest_generation,
            construct,
        }))
    }

    /// Resolve the converter of a member type, peeling array/list wrappers
    /// and reapplying them innermost first.
    fn resolve(&mut self, ty: TypeRef) -> Result<Arc<dyn Converter>> {
        let mut shape = ty.shape();
        if !matches!(shape, Shape::Enum(_)) {
            if let Some(converter) = self.catalog.get(ty.id()) {
                return Ok(converter);
            }
        }

        let mut wrappers: Vec<(TypeRef, SequenceShape)> = Vec::new();
        let mut current = ty;
        while let Shape::Array(sequence) | Shape::List(sequence) = shape {
            let element = sequence.element();
            wrappers.push((current, sequence));
            current = element;
            shape = current.shape();
        }

        let mut converter = self.resolve_core(current, shape)?;
        for (wrapped, sequence) in wrappers.into_iter().rev() {
            converter = match self.catalog.get(wrapped.id()) {
                Some(existing) => existing,
                None => self.remember(
                    wrapped,
                    Arc::new(SequenceConverter::new(
                        wrapped.name(),
                        Arc::clone(&sequence.access),
                        converter,
                        self.mode,
                    )),
                ),
            };
        }
        Ok(converter)
    }

    fn resolve_core(&mut self, ty: TypeRef, shape: Shape) -> Result<Arc<dyn Converter>> {
        // enums always encode as their underlying integer, even over a
        // catalog entry registered for the enum type itself
        let shape = match shape {
            Shape::Enum(shape) => return self.resolve_enum(ty, shape),
            shape => shape,
        };
        if let Some(converter) = self.catalog.get(ty.id()) {
            return Ok(converter);
        }
        match shape {
            Shape::Abstract => Err(SchemaError::UnresolvedAbstract {
                type_name: ty.name(),
            }
            .into()),
            Shape::Primitive => Err(SchemaError::MissingConverter {
                type_name: ty.name(),
            }
            .into()),
            Shape::Enum(shape) => self.resolve_enum(ty, shape),
            Shape::Optional(shape) => {
                let inner = self.resolve(shape.inner())?;
                Ok(self.remember(
                    ty,
                    Arc::new(NullableConverter::new(
                        ty.name(),
                        shape.access,
                        inner,
                        self.mode,
                    )),
                ))
            }
            Shape::Struct(shape) => {
                let converter = match shape.converter.filter(|o| o.applies_to(self.mode)) {
                    Some(custom) => {
                        log::trace!("[plan] {} uses its declared converter", ty.name());
                        custom.instantiate()
                    }
                    None => Arc::new(PlanConverter::new(self.build_plan(ty, &shape)?)),
                };
                Ok(self.remember(ty, converter))
            }
            Shape::Array(_) | Shape::List(_) => self.resolve(ty),
        }
    }

    fn resolve_enum(&mut self, ty: TypeRef, shape: EnumShape) -> Result<Arc<dyn Converter>> {
        let underlying = shape.underlying();
        let inner = self.resolve_core(underlying, underlying.shape())?;
        Ok(self.remember(
            ty,
            Arc::new(EnumConverter::new(ty.name(), shape.access, inner)),
        ))
    }

    fn remember(&mut self, ty: TypeRef, converter: Arc<dyn Converter>) -> Arc<dyn Converter> {
        self.catalog.register(ty.id(), Arc::clone(&converter));
        converter
    }
}
