// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for plan construction, serialization and deserialization.
//!
//! Failures fall into four groups: schema errors raised while a codec is
//! built, compatibility errors for payloads from a newer schema, data errors
//! for malformed input, and value errors for values a plan cannot encode.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by every fallible `ubin` operation.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Construction
    // ========================================================================
    /// The target type cannot be turned into a type plan.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    // ========================================================================
    // Deserialization
    // ========================================================================
    /// The payload was written by a schema newer than the reader's.
    #[error(
        "payload generation {payload} exceeds latest known generation {latest} of '{type_name}'"
    )]
    Compatibility {
        /// Root type of the reading codec.
        type_name: &'static str,
        /// Generation found in the payload header.
        payload: u16,
        /// Latest generation the reader's plan knows about.
        latest: u16,
    },

    /// The byte stream is malformed.
    #[error("malformed data: {0}")]
    Data(#[from] DataError),

    // ========================================================================
    // Serialization
    // ========================================================================
    /// A value cannot be represented by its member's encoding.
    #[error("invalid value for member '{}': {reason}", .member.as_deref().unwrap_or("<value>"))]
    Value {
        /// Member being written, once known.
        member: Option<String>,
        /// Human-readable reason.
        reason: String,
    },

    /// An erased value did not have the type its converter expects.
    #[error("type mismatch: expected '{expected}'")]
    TypeMismatch {
        /// Name of the expected type.
        expected: &'static str,
    },

    /// Sink or source failure other than a premature end of data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Value error not yet attributed to a member.
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::Value {
            member: None,
            reason: reason.into(),
        }
    }

    /// Value error attributed to `member`.
    pub fn member_value(member: &str, reason: impl Into<String>) -> Self {
        Self::Value {
            member: Some(member.to_string()),
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch<T: ?Sized>() -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>(),
        }
    }

    /// Attach a member name to a value error raised below the member walk.
    pub(crate) fn in_member(self, name: &str) -> Self {
        match self {
            Self::Value {
                member: None,
                reason,
            } => Self::Value {
                member: Some(name.to_string()),
                reason,
            },
            other => other,
        }
    }
}

/// Construction-time failures. Not retryable: the type itself must change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two members declare the same ordinal.
    #[error("'{type_name}' declares ordinal {index} more than once")]
    DuplicateIndex {
        /// Owning type.
        type_name: &'static str,
        /// Offending ordinal.
        index: i32,
    },

    /// No member survived discovery.
    #[error("'{type_name}' has no serializable members")]
    NoMembers {
        /// Owning type.
        type_name: &'static str,
    },

    /// Primitive, enum, collection or optional types cannot anchor a plan.
    #[error("'{type_name}' cannot anchor a type plan ({kind} types are converter-resolved)")]
    UnsupportedRoot {
        /// Rejected root type.
        type_name: &'static str,
        /// Shape kind of the rejected type.
        kind: &'static str,
    },

    /// A member marked with an ordinal lacks a getter or a setter.
    #[error("member '{member}' of '{type_name}' has an ordinal but is not {missing}")]
    InaccessibleMember {
        /// Owning type.
        type_name: &'static str,
        /// Member name.
        member: &'static str,
        /// `"readable"` or `"writable"`.
        missing: &'static str,
    },

    /// Abstract member type without a caller-registered converter.
    #[error("abstract type '{type_name}' has no registered converter")]
    UnresolvedAbstract {
        /// Abstract type.
        type_name: &'static str,
    },

    /// Primitive type with no converter in the catalog.
    #[error("no converter registered for primitive type '{type_name}'")]
    MissingConverter {
        /// Primitive type.
        type_name: &'static str,
    },

    /// The type graph loops back onto a type whose plan is being built.
    #[error("'{type_name}' is self-referential via {path}")]
    RecursiveType {
        /// Type encountered twice.
        type_name: &'static str,
        /// Chain of types being built, outermost first.
        path: String,
    },

    /// Complex type without a default constructor.
    #[error("'{type_name}' has no default constructor")]
    NotConstructible {
        /// Owning type.
        type_name: &'static str,
    },
}

/// Malformed-stream failures raised while reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The source ended early.
    #[error("unexpected end of data at offset {offset} ({needed} more bytes needed)")]
    UnexpectedEof {
        /// Bytes consumed before the failing read.
        offset: usize,
        /// Size of the failing read.
        needed: usize,
    },

    /// Negative or oversized element count, or a count that does not fit
    /// a fixed-length array.
    #[error("invalid element count {count} at offset {offset}")]
    InvalidCount {
        /// Decoded count.
        count: i64,
        /// Offset just after the count.
        offset: usize,
    },

    /// Bytes that decode to no valid value.
    #[error("invalid {what} at offset {offset}: {reason}")]
    InvalidValue {
        /// What was being decoded.
        what: &'static str,
        /// Offset just after the bad value.
        offset: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// A null marker where the member cannot be null.
    #[error("unexpected null for non-nullable member '{member}'")]
    UnexpectedNull {
        /// Member name.
        member: String,
    },
}
