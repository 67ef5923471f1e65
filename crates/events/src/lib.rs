// In crates/events/src/lib.rs

pub mod classifier;
pub mod error;
pub mod types;

pub use classifier::{
    ENDED_EVENT_VISIBLE_DAYS, check_not_ended_event, classify, compare_events, list_events,
};
pub use error::{Error, Result};
pub use types::{Classification, ClassifiedEvent, EventStatus, EventWindow, parse_event_time};
