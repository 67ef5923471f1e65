// In crates/events/src/classifier.rs

use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;

use crate::error::Result;
use crate::types::{Classification, ClassifiedEvent, EventStatus, EventWindow};

/// Ended events stay listed for this many days after their end.
pub const ENDED_EVENT_VISIBLE_DAYS: i64 = 7;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Places an event relative to `now` and counts the days that matter for its
/// status: until the end while ongoing, since the end once ended, and until the
/// start while upcoming. Partial days round up.
pub fn classify(event: &EventWindow, now: DateTime<Utc>) -> Classification {
    if now > event.end_time {
        Classification {
            status: EventStatus::Ended,
            days_left: ceil_days(now - event.end_time),
        }
    } else if now >= event.start_time {
        Classification {
            status: EventStatus::Ongoing,
            days_left: ceil_days(event.end_time - now),
        }
    } else {
        Classification {
            status: EventStatus::Upcoming,
            days_left: ceil_days(event.start_time - now),
        }
    }
}

/// Whether the event should still be listed at `now`.
pub fn check_not_ended_event(event: &EventWindow, now: DateTime<Utc>) -> bool {
    let classification = classify(event, now);
    classification.status != EventStatus::Ended || classification.days_left <= ENDED_EVENT_VISIBLE_DAYS
}

/// Display order for classified events, as a single comparator:
/// featuring score (highest first), then ongoing before upcoming before ended,
/// then the most pressing event within a status. Ties fall back to the id so
/// the order never depends on the input order.
pub fn compare_events(a: &ClassifiedEvent, b: &ClassifiedEvent) -> Ordering {
    b.event
        .featuring_score()
        .cmp(&a.event.featuring_score())
        .then_with(|| a.status.priority().cmp(&b.status.priority()))
        .then_with(|| match a.status {
            // Statuses are equal here.
            EventStatus::Ongoing => a.event.end_time.cmp(&b.event.end_time),
            EventStatus::Upcoming => a.event.start_time.cmp(&b.event.start_time),
            EventStatus::Ended => b.event.end_time.cmp(&a.event.end_time),
        })
        .then_with(|| a.event.id.cmp(&b.event.id))
}

/// Classifies the events, drops the ones that ended too long ago, and orders
/// the rest for display.
pub fn list_events(events: &[EventWindow], now: DateTime<Utc>) -> Result<Vec<ClassifiedEvent>> {
    let mut listed = Vec::with_capacity(events.len());
    for event in events {
        event.validate()?;
        if !check_not_ended_event(event, now) {
            continue;
        }
        let Classification { status, days_left } = classify(event, now);
        listed.push(ClassifiedEvent {
            event: event.clone(),
            status,
            days_left,
        });
    }
    listed.sort_by(compare_events);

    tracing::debug!(total = events.len(), visible = listed.len(), "Listed events.");
    Ok(listed)
}

fn ceil_days(delta: TimeDelta) -> i64 {
    let ms = delta.num_milliseconds().max(0);
    (ms + DAY_MS - 1) / DAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> EventWindow {
        EventWindow {
            id: id.to_string(),
            title: id.to_uppercase(),
            start_time: start,
            end_time: end,
            is_featuring: false,
            score: 0,
        }
    }

    fn featured(mut event: EventWindow, score: i64) -> EventWindow {
        event.is_featuring = true;
        event.score = score;
        event
    }

    #[test]
    fn ongoing_event_counts_days_until_end() {
        let e = event("cup", now() - TimeDelta::days(2), now() + TimeDelta::days(3));
        let c = classify(&e, now());
        assert_eq!(c.status, EventStatus::Ongoing);
        assert_eq!(c.days_left, 3);
        assert!(check_not_ended_event(&e, now()));
    }

    #[test]
    fn event_ended_ten_days_ago_is_hidden() {
        let e = event("old", now() - TimeDelta::days(30), now() - TimeDelta::days(10));
        let c = classify(&e, now());
        assert_eq!(c.status, EventStatus::Ended);
        assert_eq!(c.days_left, 10);
        assert!(!check_not_ended_event(&e, now()));
    }

    #[test]
    fn ended_event_stays_visible_for_seven_days() {
        let seven = event("seven", now() - TimeDelta::days(20), now() - TimeDelta::days(7));
        assert!(check_not_ended_event(&seven, now()));

        // Seven days and one hour rounds up to eight.
        let eight = event(
            "eight",
            now() - TimeDelta::days(20),
            now() - TimeDelta::days(7) - TimeDelta::hours(1),
        );
        assert_eq!(classify(&eight, now()).days_left, 8);
        assert!(!check_not_ended_event(&eight, now()));
    }

    #[test]
    fn upcoming_event_counts_days_until_start() {
        let e = event("soon", now() + TimeDelta::hours(25), now() + TimeDelta::days(5));
        let c = classify(&e, now());
        assert_eq!(c.status, EventStatus::Upcoming);
        assert_eq!(c.days_left, 2);
    }

    #[test]
    fn window_boundaries_count_as_ongoing() {
        let starts_now = event("a", now(), now() + TimeDelta::days(1));
        assert_eq!(classify(&starts_now, now()).status, EventStatus::Ongoing);
        let ends_now = event("b", now() - TimeDelta::days(1), now());
        let c = classify(&ends_now, now());
        assert_eq!(c.status, EventStatus::Ongoing);
        assert_eq!(c.days_left, 0);
    }

    #[test]
    fn listing_orders_by_featuring_status_then_urgency() {
        let events = vec![
            event("ended-late", now() - TimeDelta::days(9), now() - TimeDelta::days(1)),
            event("ended-early", now() - TimeDelta::days(9), now() - TimeDelta::days(5)),
            event("upcoming-far", now() + TimeDelta::days(10), now() + TimeDelta::days(20)),
            event("upcoming-near", now() + TimeDelta::days(1), now() + TimeDelta::days(20)),
            event("ongoing-long", now() - TimeDelta::days(1), now() + TimeDelta::days(9)),
            event("ongoing-short", now() - TimeDelta::days(1), now() + TimeDelta::days(2)),
            featured(event("featured-upcoming", now() + TimeDelta::days(3), now() + TimeDelta::days(4)), 1),
            featured(event("featured-top", now() - TimeDelta::days(3), now() - TimeDelta::days(2)), 5),
            event("ended-hidden", now() - TimeDelta::days(40), now() - TimeDelta::days(30)),
        ];

        let ids: Vec<String> = list_events(&events, now())
            .unwrap()
            .into_iter()
            .map(|c| c.event.id)
            .collect();

        assert_eq!(
            ids,
            vec![
                "featured-top",
                "featured-upcoming",
                "ongoing-short",
                "ongoing-long",
                "upcoming-near",
                "upcoming-far",
                "ended-late",
                "ended-early",
            ]
        );
    }

    #[test]
    fn ordering_does_not_depend_on_input_order() {
        let a = event("a", now() - TimeDelta::days(1), now() + TimeDelta::days(2));
        let b = event("b", now() - TimeDelta::days(1), now() + TimeDelta::days(2));
        let forward = list_events(&[a.clone(), b.clone()], now()).unwrap();
        let backward = list_events(&[b, a], now()).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn invalid_window_aborts_listing() {
        let broken = event("broken", now(), now() - TimeDelta::days(1));
        assert_eq!(
            list_events(&[broken], now()),
            Err(Error::InvalidWindow {
                id: "broken".to_string()
            })
        );
    }
}
