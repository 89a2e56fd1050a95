//! Error types for sparse matrix conversion

use thiserror::Error;

use crate::matrix::{DType, SourceFormat};
use crate::runtime::VectorKind;

/// Errors that can occur while converting a sparse matrix
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The source element type has no foreign counterpart
    #[error("unknown dtype {0} cannot be converted to a foreign sparse matrix")]
    UnsupportedElementType(DType),

    /// A diagonal source stores more diagonals than `*diMatrix` can hold
    #[error(
        "cannot convert a dia matrix with more than 1 diagonal to a *diMatrix: \
         diagonal matrices only support 1 diagonal, but this has {0}"
    )]
    TooManyDiagonals(usize),

    /// No converter exists for the presented source format
    #[error("no converter registered for source type `{0}`")]
    UnsupportedSourceType(String),

    /// The source arrays violate the format's structural invariants
    #[error("malformed {format} matrix: {reason}")]
    MalformedMatrix { format: SourceFormat, reason: String },

    /// A native value cannot be coerced to the requested foreign element kind
    #[error("value {value} cannot be represented as a foreign {kind} vector")]
    ValueOutOfRange { value: String, kind: VectorKind },

    /// The foreign runtime could not import a package
    #[error("foreign package `{0}` is not available")]
    PackageNotFound(String),

    /// The foreign runtime does not know the requested class
    #[error("unknown foreign class `{0}`")]
    UnknownClass(String),

    /// A slot handed to `new_instance` failed the class definition
    #[error("invalid slot `{slot}` for class `{class}`: {reason}")]
    InvalidSlot {
        class: String,
        slot: String,
        reason: String,
    },
}

impl ConversionError {
    pub(crate) fn malformed(format: SourceFormat, reason: impl Into<String>) -> Self {
        ConversionError::MalformedMatrix {
            format,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_slot(class: &str, slot: &str, reason: impl Into<String>) -> Self {
        ConversionError::InvalidSlot {
            class: class.to_string(),
            slot: slot.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
