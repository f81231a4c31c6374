//! Error kinds raised by the collections.
//!
//! Absent lookups are not errors: `get`, `key_of` and `index_of` return
//! `Option`. Everything here is fail-fast and raised before any index is
//! touched.

use crate::type_guard::TypeSpec;
use core::fmt;
use thiserror::Error;

/// Which declaration of a container an error refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    Value,
    Key,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Value => f.write_str("value"),
            Role::Key => f.write_str("key"),
        }
    }
}

/// Errors raised by collection operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CollectionError {
    /// A value or key does not satisfy the declared type.
    #[error("{message} (declared {role} type `{expected}`, got {found})")]
    TypeMismatch {
        role: Role,
        expected: TypeSpec,
        found: String,
        message: String,
        code: i32,
    },

    /// Two lists with different declared value types were combined.
    #[error("list value types differ: `{expected}` vs `{found}`")]
    IncompatibleTypes { expected: TypeSpec, found: TypeSpec },

    /// A position lies outside the bounds valid for the operation.
    #[error("index {index} is out of range [{lower}, {upper}]")]
    OutOfRange { index: i64, lower: i64, upper: i64 },

    /// A range whose start lies after its end.
    #[error("range start {from} is after range end {to}")]
    InvalidRange { from: usize, to: usize },

    /// A non-integer was supplied where a position is required.
    #[error("index is not an integer: got {found}")]
    InvalidIndexKind { found: String },

    /// The declared type of a populated container cannot change.
    #[error("cannot change the {role} type of a populated collection")]
    StateConflict { role: Role },

    /// Keys of a non-primitive type cannot form a flat export.
    #[error("cannot export a collection keyed by non-primitive type `{key_type}`")]
    Representation { key_type: TypeSpec },

    /// A type declaration that names nothing.
    #[error("invalid type specifier: {0:?}")]
    InvalidTypeSpec(String),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
