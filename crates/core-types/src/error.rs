// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The field does not exist on the row, or its kind does not fit the operation.
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid predicate on `{field}`: {reason}")]
    InvalidPredicate { field: String, reason: String },

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
}

impl Error {
    pub fn unknown_field(field: &str) -> Self {
        Error::InvalidField {
            field: field.to_string(),
            reason: "no such field on this row".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
