// In crates/events/src/types.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// A promotional campaign's time window, as delivered by the events API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "deserialize_event_time")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_event_time")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_featuring: bool,
    #[serde(default)]
    pub score: i64,
}

impl EventWindow {
    pub fn validate(&self) -> Result<()> {
        if self.end_time < self.start_time {
            return Err(Error::InvalidWindow { id: self.id.clone() });
        }
        Ok(())
    }

    /// Featured events carry their score; unfeatured ones rank below all of them.
    pub fn featuring_score(&self) -> Option<i64> {
        self.is_featuring.then_some(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Ongoing,
    Upcoming,
    Ended,
}

impl EventStatus {
    /// Display priority, lower first.
    pub fn priority(self) -> u8 {
        match self {
            EventStatus::Ongoing => 0,
            EventStatus::Upcoming => 1,
            EventStatus::Ended => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: EventStatus,
    pub days_left: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEvent {
    #[serde(flatten)]
    pub event: EventWindow,
    pub status: EventStatus,
    pub days_left: i64,
}

/// Parses the loosely formatted timestamps the events API emits.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` and `YYYY-MM-DD HH:MM:SS[.fff]`
/// (both read as UTC), and bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_event_time(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidTime {
            value: value.to_string(),
        })
}

fn deserialize_event_time<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_time(&raw).map_err(serde::de::Error::custom)
}
