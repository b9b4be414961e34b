//! Error types for grove serialization and deserialization.

use thiserror::Error;

/// Errors that can occur while writing or reading a document.
///
/// Every failure mid-traversal leaves the backend cursor in a position that
/// is unsafe to continue from, so there is no per-call recovery: callers
/// that want partial-success semantics must catch at a traversal boundary
/// and discard the partially built result.
#[derive(Error, Debug)]
pub enum GroveError {
    /// The input text was not well-formed JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A node was used while it was not the innermost open scope, or a
    /// document was finished with unclosed scopes.
    #[error("node usage error: {0}")]
    Usage(&'static str),

    /// A required object member was missing on read.
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    /// An array index past the end of the current array was requested.
    #[error("index {index} out of range (array length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The pending value's type is incompatible with the requested one.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An integer outside the exactly-representable range: beyond the
    /// destination width on read, or beyond ±2^53 on write (JSON numbers
    /// commit to double precision).
    #[error("integer out of representable range: {value}")]
    IntegerRange { value: String },

    /// A numeric token with a fractional part was read as an integer.
    #[error("precision loss converting {value} to {target}")]
    PrecisionLoss {
        value: String,
        target: &'static str,
    },

    /// Infinity and NaN have no JSON representation.
    #[error("non-finite float has no JSON representation")]
    NonFiniteFloat,
}

/// Convenience alias used throughout grove-core.
pub type Result<T> = std::result::Result<T, GroveError>;
