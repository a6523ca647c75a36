use thiserror::Error;

/// Failures that make a whole call meaningless.
///
/// Per-field problems (an empty cell, an unresolvable cross-reference, an
/// unparsable token) are not errors; they come back as empty values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("Key '{key}' not found in grid headers")]
    KeyNotFound { key: String },
}

pub type Result<T> = std::result::Result<T, TheoryError>;
