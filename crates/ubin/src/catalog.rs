// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter catalog keyed by type identity.
//!
//! A codec seeds its catalog with the built-ins, overlays caller-supplied
//! converters, then lets the plan builder memoize every converter it
//! synthesizes. After construction the catalog is only read.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::builtin;
use crate::convert::{erase, Converter, ValueConverter};

/// Type identity -> converter map.
#[derive(Clone, Default)]
pub struct ConverterCatalog {
    entries: HashMap<TypeId, Arc<dyn Converter>>,
}

impl ConverterCatalog {
    /// Empty catalog, typically used to collect caller overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding one converter per built-in type.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        builtin::seed(&mut catalog);
        catalog
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<T: Any, C: ValueConverter<T>>(mut self, converter: C) -> Self {
        self.insert::<T, C>(converter);
        self
    }

    /// Register a typed converter for `T`, replacing any previous entry.
    pub fn insert<T: Any, C: ValueConverter<T>>(&mut self, converter: C) {
        self.register(TypeId::of::<T>(), erase::<T, C>(converter));
    }

    /// Register an erased converter for `T`, e.g. for an abstract member type.
    pub fn insert_erased<T: Any + ?Sized>(&mut self, converter: Arc<dyn Converter>) {
        self.register(TypeId::of::<T>(), converter);
    }

    /// Register under a raw type identity; returns the replaced entry.
    pub fn register(
        &mut self,
        id: TypeId,
        converter: Arc<dyn Converter>,
    ) -> Option<Arc<dyn Converter>> {
        log::trace!("[catalog] register {}", converter.target());
        self.entries.insert(id, converter)
    }

    pub fn get(&self, id: TypeId) -> Option<Arc<dyn Converter>> {
        self.entries.get(&id).cloned()
    }

    pub fn get_for<T: Any + ?Sized>(&self) -> Option<Arc<dyn Converter>> {
        self.get(TypeId::of::<T>())
    }

    pub fn contains<T: Any + ?Sized>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `overrides` into `self`, replacing collisions.
    pub fn extend_from(&mut self, overrides: &Self) {
        for (id, converter) in &overrides.entries {
            self.register(*id, Arc::clone(converter));
        }
    }
}

impl fmt::Debug for ConverterCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|c| c.target()).collect();
        names.sort_unstable();
        f.debug_struct("ConverterCatalog")
            .field("entries", &names)
            .finish()
    }
}
