//! Error types for lccqa

use thiserror::Error;

/// Main error type for lccqa operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Expected observation source for a period/version is absent.
    #[error("{path} does not exist")]
    MissingSource { path: String },

    /// An observation or rule references a class absent from the registry.
    #[error("Unknown class '{class}' ({context})")]
    UnknownClass { class: String, context: String },

    #[error("Transition code {0} is not in the lookup table")]
    UnknownTransitionCode(i64),

    #[error("Duplicate class: {0}")]
    DuplicateClass(String),

    #[error("Class set mismatch: expected [{expected}], got [{actual}]")]
    ShapeMismatch { expected: String, actual: String },

    #[error("Period mismatch: expected {expected}, got {actual}")]
    PeriodMismatch { expected: String, actual: String },

    /// Normalizing by a total change of zero is undefined.
    #[error("Total change is zero for {key}, cannot normalize")]
    ZeroTotalChange { key: String },

    #[error("Duplicate column label: {0}")]
    DuplicateColumn(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub fn unknown_class(class: impl Into<String>, context: impl Into<String>) -> Self {
        Error::UnknownClass {
            class: class.into(),
            context: context.into(),
        }
    }
}

/// Result type alias for lccqa operations
pub type Result<T> = std::result::Result<T, Error>;
