// In crates/events/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid event time `{value}`")]
    InvalidTime { value: String },

    #[error("Event `{id}` ends before it starts")]
    InvalidWindow { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
