// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static type descriptions consumed by the plan builder.
//!
//! A type takes part in serialization by implementing [`Binary`], usually
//! through `#[derive(Binary)]`. The returned [`Shape`] tells the builder
//! how to resolve a converter: from the catalog, by peeling a wrapper
//! (array, list, optional, enum) or by building a nested plan.

mod impls;
mod member;

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};

pub(crate) use member::Accessor;
pub use member::{ConverterOverride, MemberDecl, StructShape, StructShapeBuilder};

/// A type the codec can describe.
pub trait Binary: Any {
    fn shape() -> Shape;
}

/// Identity of a [`Binary`] type plus a lazy handle on its shape.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
    shape: fn() -> Shape,
}

impl TypeRef {
    pub fn of<T: Binary>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape: T::shape,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How the plan builder treats a type.
#[derive(Clone)]
pub enum Shape {
    /// Leaf type; needs a converter in the catalog.
    Primitive,
    /// Untyped or polymorphic; needs a caller-registered converter.
    Abstract,
    /// Enumeration encoded as its underlying integer.
    Enum(EnumShape),
    /// Value that may be absent.
    Optional(OptionalShape),
    /// Fixed or boxed array.
    Array(SequenceShape),
    /// Growable ordered collection.
    List(SequenceShape),
    /// Complex type described member by member.
    Struct(StructShape),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Abstract => "abstract",
            Self::Enum(_) => "enum",
            Self::Optional(_) => "optional",
            Self::Array(_) => "array",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
        }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Fieldless enumeration with an integer representation.
pub trait BinaryEnum: Any + Sized {
    type Repr: Binary + Copy + fmt::Debug;

    fn to_repr(&self) -> Self::Repr;

    /// `None` for a discriminant with no variant.
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

pub(crate) trait EnumAccess: Send + Sync {
    fn to_underlying(&self, value: &dyn Any) -> Result<Box<dyn Any>>;

    /// `Ok(Err(..))` carries a description of an unknown discriminant.
    fn from_underlying(&self, raw: Box<dyn Any>)
        -> Result<std::result::Result<Box<dyn Any>, String>>;
}

struct EnumOps<E>(PhantomData<fn() -> E>);

impl<E: BinaryEnum> EnumAccess for EnumOps<E> {
    fn to_underlying(&self, value: &dyn Any) -> Result<Box<dyn Any>> {
        let value = value.downcast_ref::<E>().ok_or_else(Error::mismatch::<E>)?;
        Ok(Box::new(value.to_repr()))
    }

    fn from_underlying(
        &self,
        raw: Box<dyn Any>,
    ) -> Result<std::result::Result<Box<dyn Any>, String>> {
        let repr = *raw.downcast::<E::Repr>().map_err(|_| Error::mismatch::<E::Repr>())?;
        Ok(E::from_repr(repr)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .ok_or_else(|| format!("{} has no variant for {repr:?}", type_name::<E>())))
    }
}

#[derive(Clone)]
pub struct EnumShape {
    underlying: TypeRef,
    pub(crate) access: Arc<dyn EnumAccess>,
}

impl EnumShape {
    pub fn of<E: BinaryEnum>() -> Self {
        Self {
            underlying: TypeRef::of::<E::Repr>(),
            access: Arc::new(EnumOps::<E>(PhantomData)),
        }
    }

    pub fn underlying(&self) -> TypeRef {
        self.underlying
    }
}

// ============================================================================
// Optional values
// ============================================================================

pub(crate) trait OptionalAccess: Send + Sync {
    fn project<'a>(&self, value: &'a dyn Any) -> Result<Option<&'a dyn Any>>;

    fn wrap(&self, inner: Option<Box<dyn Any>>) -> Result<Box<dyn Any>>;
}

struct OptionalOps<T>(PhantomData<fn() -> T>);

impl<T: Binary> OptionalAccess for OptionalOps<T> {
    fn project<'a>(&self, value: &'a dyn Any) -> Result<Option<&'a dyn Any>> {
        let value = value
            .downcast_ref::<Option<T>>()
            .ok_or_else(Error::mismatch::<Option<T>>)?;
        Ok(value.as_ref().map(|inner| inner as &dyn Any))
    }

    fn wrap(&self, inner: Option<Box<dyn Any>>) -> Result<Box<dyn Any>> {
        match inner {
            None => Ok(Box::new(None::<T>)),
            Some(inner) => {
                let inner = inner.downcast::<T>().map_err(|_| Error::mismatch::<T>())?;
                Ok(Box::new(Some(*inner)))
            }
        }
    }
}

#[derive(Clone)]
pub struct OptionalShape {
    inner: TypeRef,
    pub(crate) access: Arc<dyn OptionalAccess>,
}

impl OptionalShape {
    pub fn of<T: Binary>() -> Self {
        Self {
            inner: TypeRef::of::<T>(),
            access: Arc::new(OptionalOps::<T>(PhantomData)),
        }
    }

    pub fn inner(&self) -> TypeRef {
        self.inner
    }
}

// ============================================================================
// Sequences
// ============================================================================

/// Ordered collection usable as an array or list member.
pub trait BinarySequence: Any + Sized {
    type Item: Binary;

    /// Exact element count of every value, for fixed-size arrays.
    const FIXED_LEN: Option<usize> = None;

    fn item_count(&self) -> usize;

    fn try_for_each_item(&self, f: &mut dyn FnMut(&Self::Item) -> Result<()>) -> Result<()>;

    /// Rebuild from decoded items; `None` if the count does not fit.
    fn from_items(items: Vec<Self::Item>) -> Option<Self>;
}

pub(crate) trait SequenceAccess: Send + Sync {
    fn fixed_len(&self) -> Option<usize>;

    fn len(&self, value: &dyn Any) -> Result<usize>;

    fn visit(&self, value: &dyn Any, f: &mut dyn FnMut(&dyn Any) -> Result<()>) -> Result<()>;

    /// `Ok(None)` when the item count does not fit the collection.
    fn collect(&self, items: Vec<Box<dyn Any>>) -> Result<Option<Box<dyn Any>>>;
}

struct SequenceOps<C>(PhantomData<fn() -> C>);

impl<C: BinarySequence> SequenceAccess for SequenceOps<C> {
    fn fixed_len(&self) -> Option<usize> {
        C::FIXED_LEN
    }

    fn len(&self, value: &dyn Any) -> Result<usize> {
        value
            .downcast_ref::<C>()
            .map(C::item_count)
            .ok_or_else(Error::mismatch::<C>)
    }

    fn visit(&self, value: &dyn Any, f: &mut dyn FnMut(&dyn Any) -> Result<()>) -> Result<()> {
        let sequence = value.downcast_ref::<C>().ok_or_else(Error::mismatch::<C>)?;
        sequence.try_for_each_item(&mut |item| f(item as &dyn Any))
    }

    fn collect(&self, items: Vec<Box<dyn Any>>) -> Result<Option<Box<dyn Any>>> {
        let items = items
            .into_iter()
            .map(|item| {
                item.downcast::<C::Item>()
                    .map(|item| *item)
                    .map_err(|_| Error::mismatch::<C::Item>())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(C::from_items(items).map(|sequence| Box::new(sequence) as Box<dyn Any>))
    }
}

#[derive(Clone)]
pub struct SequenceShape {
    element: TypeRef,
    pub(crate) access: Arc<dyn SequenceAccess>,
}

impl SequenceShape {
    pub fn of<C: BinarySequence>() -> Self {
        Self {
            element: TypeRef::of::<C::Item>(),
            access: Arc::new(SequenceOps::<C>(PhantomData)),
        }
    }

    pub fn element(&self) -> TypeRef {
        self.element
    }
}
