//! Error types for tsdelta.

use thiserror::Error;

/// Result type alias using tsdelta's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tsdelta operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value cannot be honoured (e.g. a zero offset).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A selected attribute does not have the kind the merge policy needs.
    #[error("unsupported attribute type: attribute {index} ('{name}') must be numeric")]
    UnsupportedAttributeType {
        /// Attribute name.
        name: String,
        /// Zero-based attribute index.
        index: usize,
    },

    /// An operation was called out of lifecycle order.
    #[error("invalid state: cannot {operation} while {state}")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the component was in.
        state: &'static str,
    },

    /// The attribute selection does not parse or does not fit the schema.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// A record does not carry one value per schema attribute.
    #[error("schema mismatch: expected {expected} values, got {actual}")]
    SchemaMismatch {
        /// Number of attributes in the input schema.
        expected: usize,
        /// Number of values in the record.
        actual: usize,
    },
}

impl Error {
    /// Shorthand for a lifecycle violation.
    pub(crate) fn invalid_state(operation: &'static str, state: &'static str) -> Self {
        Self::InvalidState { operation, state }
    }
}
