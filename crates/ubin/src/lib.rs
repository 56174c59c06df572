// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # ubin - binary object codec
//!
//! Compact, deterministic binary encoding of Rust types, driven by a type
//! plan compiled once per codec instance.
//!
//! ## Quick Start
//!
//! ```rust
//! use ubin::{Binary, SafeCodec};
//!
//! #[derive(Debug, Default, PartialEq, Binary)]
//! struct Texture {
//!     path: String,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Binary)]
//! struct Player {
//!     #[bin(index = 0)]
//!     health: i32,
//!     #[bin(index = 1, generation = 2)]
//!     hunger: i32,
//!     #[bin(index = 2)]
//!     skin: Option<Texture>,
//! }
//!
//! fn main() -> ubin::Result<()> {
//!     let codec = SafeCodec::<Player>::new()?;
//!     let player = Player { health: 20, hunger: 5, skin: None };
//!     let bytes = codec.serialize(&player)?;
//!     assert_eq!(codec.deserialize(&bytes)?, player);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |            SafeCodec<T> (versioned)  |  UnsafeCodec<T> (fixed)      |
//! +---------------------------------------------------------------------+
//! |   TypePlan: ordered (member, converter) bindings, latest generation |
//! +---------------------------------------------------------------------+
//! |   PlanBuilder: member resolution, wrapper peeling, nested plans     |
//! +---------------------------------------------------------------------+
//! |   ConverterCatalog: built-ins | caller overrides | synthesized      |
//! +---------------------------------------------------------------------+
//! |   Writer / Reader: little-endian primitives, text encodings        |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modes
//!
//! | | Safe | Unsafe |
//! |---|---|---|
//! | Header | `u16` generation | none |
//! | Member gating | by generation | none |
//! | `Option<T>` | presence byte (`-1` count for collections) | value required |
//! | Default text encoding | UTF-8 | ASCII |
//!
//! ## Modules Overview
//!
//! - [`shape`] - how types describe themselves ([`Binary`], [`MemberDecl`])
//! - [`convert`] - converter traits and user converter adapters
//! - [`builtin`] - the built-in converter table
//! - [`plan`] - compiled type plans
//! - [`codec`] - Safe and Unsafe drivers

extern crate self as ubin;

pub mod builtin;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod plan;
pub mod ser;
pub mod shape;
pub mod text;
pub mod version;

pub use catalog::ConverterCatalog;
pub use codec::{ObjectCodec, SafeCodec, UnsafeCodec};
pub use config::{CodecConfig, Mode};
pub use convert::{erase, Converter, MemberInfo, Typed, ValueConverter};
pub use error::{DataError, Error, Result, SchemaError};
pub use plan::{MemberBinding, TypePlan};
pub use ser::{Reader, Writer};
pub use shape::{
    Binary, BinaryEnum, BinarySequence, ConverterOverride, EnumShape, MemberDecl, OptionalShape,
    SequenceShape, Shape, StructShape, StructShapeBuilder, TypeRef,
};
pub use text::TextEncoding;
pub use version::Version;

/// Derive macro for [`Binary`] (and [`BinaryEnum`] on fieldless enums).
pub use ubin_codegen::Binary;
