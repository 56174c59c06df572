// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member declarations of complex types.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{Binary, TypeRef};
use crate::config::Mode;
use crate::convert::Converter;

/// Getter/setter pair over an erased owner.
pub(crate) trait Accessor: Send + Sync {
    fn can_read(&self) -> bool;

    fn can_write(&self) -> bool;

    /// `None` if the owner has the wrong type or the member is write-only.
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;

    /// `false` if the owner or value has the wrong type or the member is read-only.
    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> bool;
}

struct FieldAccessor<S, F> {
    get: Option<fn(&S) -> &F>,
    set: Option<fn(&mut S, F)>,
}

impl<S: Any, F: Any> Accessor for FieldAccessor<S, F> {
    fn can_read(&self) -> bool {
        self.get.is_some()
    }

    fn can_write(&self) -> bool {
        self.set.is_some()
    }

    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        let get = self.get?;
        owner.downcast_ref::<S>().map(|owner| get(owner) as &dyn Any)
    }

    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> bool {
        let (Some(set), Some(owner)) = (self.set, owner.downcast_mut::<S>()) else {
            return false;
        };
        match value.downcast::<F>() {
            Ok(value) => {
                set(owner, *value);
                true
            }
            Err(_) => false,
        }
    }
}

/// One member of a complex type, as declared by the type.
#[derive(Clone)]
pub struct MemberDecl {
    pub(crate) name: &'static str,
    pub(crate) ty: TypeRef,
    pub(crate) index: Option<i32>,
    pub(crate) generation: u16,
    pub(crate) required: bool,
    pub(crate) access: Arc<dyn Accessor>,
}

impl MemberDecl {
    fn with_access<S: Any, F: Binary>(
        name: &'static str,
        get: Option<fn(&S) -> &F>,
        set: Option<fn(&mut S, F)>,
    ) -> Self {
        Self {
            name,
            ty: TypeRef::of::<F>(),
            index: None,
            generation: 0,
            required: false,
            access: Arc::new(FieldAccessor { get, set }),
        }
    }

    /// Readable and writable member.
    pub fn field<S: Any, F: Binary>(
        name: &'static str,
        get: fn(&S) -> &F,
        set: fn(&mut S, F),
    ) -> Self {
        Self::with_access(name, Some(get), Some(set))
    }

    /// Member without a setter. Skipped unless given an ordinal, which is
    /// then a schema error.
    pub fn read_only<S: Any, F: Binary>(name: &'static str, get: fn(&S) -> &F) -> Self {
        Self::with_access(name, Some(get), None)
    }

    /// Member without a getter. Same rules as [`read_only`](Self::read_only).
    pub fn write_only<S: Any, F: Binary>(name: &'static str, set: fn(&mut S, F)) -> Self {
        Self::with_access::<S, F>(name, None, Some(set))
    }

    /// Explicit ordinal. Once any member has one, undeclared members are dropped.
    pub fn index(mut self, index: i32) -> Self {
        self.index = Some(index);
        self
    }

    /// First generation carrying this member.
    pub fn generation(mut self, generation: u16) -> Self {
        self.generation = generation;
        self
    }

    /// Absence is a value error instead of an encoded null.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_ref(&self) -> TypeRef {
        self.ty
    }
}

impl fmt::Debug for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDecl")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("index", &self.index)
            .field("generation", &self.generation)
            .field("required", &self.required)
            .finish()
    }
}

/// Converter declared on a type itself, optionally for one mode only.
#[derive(Clone, Copy)]
pub struct ConverterOverride {
    factory: fn() -> Arc<dyn Converter>,
    mode: Option<Mode>,
}

impl ConverterOverride {
    pub fn new(factory: fn() -> Arc<dyn Converter>) -> Self {
        Self {
            factory,
            mode: None,
        }
    }

    /// Restrict the override to codecs of `mode`.
    pub fn only_for(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn applies_to(&self, mode: Mode) -> bool {
        self.mode.map_or(true, |only| only == mode)
    }

    pub(crate) fn instantiate(&self) -> Arc<dyn Converter> {
        (self.factory)()
    }
}

/// Member table of a complex type.
#[derive(Clone, Default)]
pub struct StructShape {
    pub(crate) members: Vec<MemberDecl>,
    pub(crate) construct: Option<fn() -> Box<dyn Any>>,
    pub(crate) converter: Option<ConverterOverride>,
}

fn construct_default<S: Default + Any>() -> Box<dyn Any> {
    Box::new(S::default())
}

impl StructShape {
    /// Start describing `S`; decoded values start from `S::default()`.
    pub fn builder<S: Default + Any>() -> StructShapeBuilder<S> {
        StructShapeBuilder {
            shape: Self {
                members: Vec::new(),
                construct: Some(construct_default::<S> as fn() -> Box<dyn Any>),
                converter: None,
            },
            _marker: PhantomData,
        }
    }

    /// Type handled only by its own converter.
    pub fn custom(converter: ConverterOverride) -> Self {
        Self {
            members: Vec::new(),
            construct: None,
            converter: Some(converter),
        }
    }

    pub fn members(&self) -> &[MemberDecl] {
        &self.members
    }
}

pub struct StructShapeBuilder<S> {
    shape: StructShape,
    _marker: PhantomData<fn() -> S>,
}

impl<S> StructShapeBuilder<S> {
    pub fn member(mut self, member: MemberDecl) -> Self {
        self.shape.members.push(member);
        self
    }

    pub fn converter(mut self, converter: ConverterOverride) -> Self {
        self.shape.converter = Some(converter);
        self
    }

    pub fn build(self) -> StructShape {
        self.shape
    }
}
