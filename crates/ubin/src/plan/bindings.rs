// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member binding resolution: inclusion, ordinals and canonical order.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::shape::{MemberDecl, StructShape};

/// A member that survived discovery, with its final ordinal.
pub(crate) struct ResolvedMember {
    pub(crate) decl: MemberDecl,
    pub(crate) ordinal: i32,
    pub(crate) generation: u16,
}

/// Select, number and order the serializable members of `type_name`.
///
/// Members lacking a getter or setter are skipped, or rejected when they
/// carry an explicit ordinal. If any member has an ordinal, members without
/// one are dropped; otherwise ordinals follow declaration order and every
/// member belongs to generation 0.
pub(crate) fn resolve_members(
    type_name: &'static str,
    shape: &StructShape,
) -> Result<Vec<ResolvedMember>, SchemaError> {
    let mut candidates = Vec::with_capacity(shape.members.len());
    for decl in &shape.members {
        let missing = if !decl.access.can_read() {
            Some("readable")
        } else if !decl.access.can_write() {
            Some("writable")
        } else {
            None
        };
        match (missing, decl.index) {
            (Some(missing), Some(_)) => {
                return Err(SchemaError::InaccessibleMember {
                    type_name,
                    member: decl.name,
                    missing,
                })
            }
            (Some(missing), None) => {
                log::trace!("[plan] {}::{} skipped (not {})", type_name, decl.name, missing);
            }
            (None, _) => candidates.push(decl),
        }
    }

    let explicit = candidates.iter().any(|decl| decl.index.is_some());
    let mut resolved = Vec::with_capacity(candidates.len());
    if explicit {
        let mut seen = HashSet::with_capacity(candidates.len());
        for decl in candidates {
            let Some(index) = decl.index else {
                log::trace!("[plan] {}::{} dropped (no ordinal)", type_name, decl.name);
                continue;
            };
            if !seen.insert(index) {
                return Err(SchemaError::DuplicateIndex { type_name, index });
            }
            resolved.push(ResolvedMember {
                decl: decl.clone(),
                ordinal: index,
                generation: decl.generation,
            });
        }
    } else {
        for (ordinal, decl) in (0..).zip(candidates) {
            resolved.push(ResolvedMember {
                decl: decl.clone(),
                ordinal,
                generation: 0,
            });
        }
    }

    if resolved.is_empty() {
        return Err(SchemaError::NoMembers { type_name });
    }
    resolved.sort_by_key(|member| member.ordinal);
    Ok(resolved)
}
