// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serialization drivers.
//!
//! [`SafeCodec`] writes a generation header and gates members by generation;
//! [`UnsafeCodec`] writes members back to back for fixed binary layouts.
//! Both build their plan at construction and are read-only afterwards, so
//! one instance can serve many threads.

mod fixed;
mod safe;

use std::any::Any;
use std::io::Read;
use std::sync::Arc;

use crate::catalog::ConverterCatalog;
use crate::config::{CodecConfig, Mode, GENERATION_HEADER_SIZE};
use crate::error::{Error, Result};
use crate::plan::{PlanBuilder, TypePlan};
use crate::ser::{Reader, Writer};
use crate::shape::{Binary, TypeRef};
use crate::text::TextEncoding;

pub use fixed::UnsafeCodec;
pub use safe::SafeCodec;

/// Type-erased codec, for hosts that keep codecs for many types.
pub trait ObjectCodec: Send + Sync {
    fn mode(&self) -> Mode;

    /// Root type handled by this codec.
    fn type_name(&self) -> &'static str;

    /// Serialize a value that must be of the root type.
    fn serialize_object(&self, value: &dyn Any) -> Result<Vec<u8>>;

    fn deserialize_object(&self, bytes: &[u8]) -> Result<Box<dyn Any>>;
}

/// Mode-independent state of a codec instance.
pub(crate) struct CodecCore {
    mode: Mode,
    plan: Arc<TypePlan>,
    catalog: ConverterCatalog,
    config: CodecConfig,
}

impl CodecCore {
    pub(crate) fn build<T: Binary>(
        mode: Mode,
        config: CodecConfig,
        custom: &ConverterCatalog,
    ) -> Result<Self> {
        let mut catalog = ConverterCatalog::with_builtins();
        catalog.extend_from(custom);
        let (plan, catalog) = PlanBuilder::new(mode, catalog).build_root(TypeRef::of::<T>())?;
        Ok(Self {
            mode,
            plan,
            catalog,
            config,
        })
    }

    /// Encode into a fresh buffer; nothing is returned on error.
    pub(crate) fn encode(&self, value: &dyn Any, encoding: TextEncoding) -> Result<Vec<u8>> {
        let generation = self
            .mode
            .is_versioned()
            .then(|| self.plan.latest_generation());
        let header = generation.map_or(0, |_| GENERATION_HEADER_SIZE);
        let mut buffer = Vec::with_capacity(header + 64);
        let mut w = Writer::new(&mut buffer, encoding, generation);
        if let Some(generation) = generation {
            w.write_u16(generation);
        }
        self.plan.write_members(value, &mut w)?;
        Ok(buffer)
    }

    pub(crate) fn decode(
        &self,
        source: &mut dyn Read,
        encoding: TextEncoding,
    ) -> Result<Box<dyn Any>> {
        let mut r = Reader::new(source, self.config.with_encoding(encoding));
        if self.mode.is_versioned() {
            let payload = r.read_u16()?;
            let latest = self.plan.latest_generation();
            if payload > latest {
                return Err(Error::Compatibility {
                    type_name: self.plan.type_name(),
                    payload,
                    latest,
                });
            }
            if payload < latest {
                log::debug!(
                    "[codec] {} payload is generation {}, plan is {}; newer members keep defaults",
                    self.plan.type_name(),
                    payload,
                    latest
                );
            }
            r.set_generation(payload);
        }
        self.plan.read_members(&mut r)
    }

    pub(crate) fn downcast<T: Any>(value: Box<dyn Any>) -> Result<T> {
        value.downcast::<T>().map(|v| *v).map_err(|_| Error::mismatch::<T>())
    }
}

/// Typed API shared by both codecs.
macro_rules! impl_typed_codec {
    ($codec:ident, $mode:expr) => {
        impl<T: Binary> $codec<T> {
            /// Build the plan of `T` with built-in converters and the
            /// configuration from the environment.
            pub fn new() -> Result<Self> {
                Self::build(CodecConfig::from_env($mode), ConverterCatalog::new())
            }

            /// Build the plan of `T`; `custom` entries replace built-ins.
            pub fn with_converters(custom: ConverterCatalog) -> Result<Self> {
                Self::build(CodecConfig::from_env($mode), custom)
            }

            pub fn build(config: CodecConfig, custom: ConverterCatalog) -> Result<Self> {
                Ok(Self {
                    core: CodecCore::build::<T>($mode, config, &custom)?,
                    _marker: PhantomData,
                })
            }

            pub fn serialize(&self, value: &T) -> Result<Vec<u8>> {
                self.core.encode(value, self.core.config.encoding)
            }

            /// Serialize with a text encoding other than the default.
            pub fn serialize_with(&self, value: &T, encoding: TextEncoding) -> Result<Vec<u8>> {
                self.core.encode(value, encoding)
            }

            /// Serialize into `sink`, returning the number of bytes written.
            ///
            /// The payload is fully encoded before the first write, so an
            /// encoding error leaves the sink untouched.
            pub fn serialize_into<W: Write>(&self, sink: &mut W, value: &T) -> Result<usize> {
                let bytes = self.serialize(value)?;
                sink.write_all(&bytes)?;
                Ok(bytes.len())
            }

            pub fn deserialize(&self, bytes: &[u8]) -> Result<T> {
                self.deserialize_with(bytes, self.core.config.encoding)
            }

            /// Deserialize text written with `encoding`.
            pub fn deserialize_with(&self, bytes: &[u8], encoding: TextEncoding) -> Result<T> {
                let mut source = bytes;
                CodecCore::downcast(self.core.decode(&mut source, encoding)?)
            }

            /// Deserialize one value from `source`, consuming only its bytes.
            pub fn deserialize_from<R: Read>(&self, source: &mut R) -> Result<T> {
                CodecCore::downcast(self.core.decode(source, self.core.config.encoding)?)
            }

            pub fn plan(&self) -> &TypePlan {
                &self.core.plan
            }

            /// Catalog as populated by plan construction.
            pub fn catalog(&self) -> &ConverterCatalog {
                &self.core.catalog
            }

            pub fn config(&self) -> &CodecConfig {
                &self.core.config
            }

            pub fn set_default_encoding(&mut self, encoding: TextEncoding) {
                self.core.config.encoding = encoding;
            }
        }

        impl<T: Binary> ObjectCodec for $codec<T> {
            fn mode(&self) -> Mode {
                $mode
            }

            fn type_name(&self) -> &'static str {
                self.core.plan.type_name()
            }

            fn serialize_object(&self, value: &dyn Any) -> Result<Vec<u8>> {
                let value = value.downcast_ref::<T>().ok_or_else(Error::mismatch::<T>)?;
                self.serialize(value)
            }

            fn deserialize_object(&self, bytes: &[u8]) -> Result<Box<dyn Any>> {
                let mut source = bytes;
                self.core.decode(&mut source, self.core.config.encoding)
            }
        }

        impl<T> std::fmt::Debug for $codec<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($codec))
                    .field("plan", &self.core.plan)
                    .field("config", &self.core.config)
                    .finish()
            }
        }
    };
}

use impl_typed_codec;
