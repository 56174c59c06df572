// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Low-level byte cursors.

mod cursor;

pub use cursor::{Reader, Writer};
