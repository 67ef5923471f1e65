// In crates/core-types/src/lib.rs

pub mod error;
pub mod rows;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use rows::{FilledOrder, HistoricalOrder, OrderStatus, OrderType, PerpDexSummary, TwapOrder, TwapStatus};
pub use types::{FieldKind, FieldValue, Record, Side, SortDirection};
