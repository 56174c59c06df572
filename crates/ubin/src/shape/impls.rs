// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Binary` for standard and ecosystem types.

use std::any::Any;
use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use super::{Binary, BinarySequence, OptionalShape, SequenceShape, Shape};
use crate::error::Result;
use crate::text::TextEncoding;
use crate::version::Version;

macro_rules! impl_primitive_shape {
    ($($type:ty),* $(,)?) => {
        $(
            impl Binary for $type {
                fn shape() -> Shape {
                    Shape::Primitive
                }
            }
        )*
    };
}

impl_primitive_shape!(
    u8,
    i8,
    u16,
    i16,
    u32,
    i32,
    u64,
    i64,
    f32,
    f64,
    bool,
    char,
    String,
    Decimal,
    NaiveDateTime,
    TimeDelta,
    DateTime<FixedOffset>,
    Uuid,
    Url,
    Version,
    TextEncoding,
);

impl<T: Binary> Binary for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(OptionalShape::of::<T>())
    }
}

/// Untyped member; requires a caller-registered converter.
impl Binary for Box<dyn Any + Send + Sync> {
    fn shape() -> Shape {
        Shape::Abstract
    }
}

impl<T: Binary> Binary for Vec<T> {
    fn shape() -> Shape {
        Shape::List(SequenceShape::of::<Self>())
    }
}

impl<T: Binary> BinarySequence for Vec<T> {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn try_for_each_item(&self, f: &mut dyn FnMut(&T) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(f)
    }

    fn from_items(items: Vec<T>) -> Option<Self> {
        Some(items)
    }
}

impl<T: Binary> Binary for VecDeque<T> {
    fn shape() -> Shape {
        Shape::List(SequenceShape::of::<Self>())
    }
}

impl<T: Binary> BinarySequence for VecDeque<T> {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn try_for_each_item(&self, f: &mut dyn FnMut(&T) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(f)
    }

    fn from_items(items: Vec<T>) -> Option<Self> {
        Some(items.into())
    }
}

impl<T: Binary> Binary for Box<[T]> {
    fn shape() -> Shape {
        Shape::Array(SequenceShape::of::<Self>())
    }
}

impl<T: Binary> BinarySequence for Box<[T]> {
    type Item = T;

    fn item_count(&self) -> usize {
        self.len()
    }

    fn try_for_each_item(&self, f: &mut dyn FnMut(&T) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(f)
    }

    fn from_items(items: Vec<T>) -> Option<Self> {
        Some(items.into_boxed_slice())
    }
}

impl<T: Binary, const N: usize> Binary for [T; N] {
    fn shape() -> Shape {
        Shape::Array(SequenceShape::of::<Self>())
    }
}

impl<T: Binary, const N: usize> BinarySequence for [T; N] {
    type Item = T;

    const FIXED_LEN: Option<usize> = Some(N);

    fn item_count(&self) -> usize {
        N
    }

    fn try_for_each_item(&self, f: &mut dyn FnMut(&T) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(f)
    }

    fn from_items(items: Vec<T>) -> Option<Self> {
        items.try_into().ok()
    }
}
