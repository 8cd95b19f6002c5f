//! Outage lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the outage this event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The failure sequence reached the confirmation threshold.
    Started,
    /// A confirmed outage resolved.
    Ended,
    /// The process shut down while an outage was still open.
    Unresolved,
}

/// An emitted outage fact. Immutable, append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutageEvent {
    pub kind: EventKind,

    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,

    /// When the failure sequence began (the true onset, not the
    /// confirmation tick).
    pub outage_start: DateTime<Utc>,

    /// `timestamp - outage_start` in seconds. Present on Ended and
    /// Unresolved events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl OutageEvent {
    pub fn started(timestamp: DateTime<Utc>, outage_start: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Started,
            timestamp,
            outage_start,
            duration_seconds: None,
        }
    }

    pub fn ended(timestamp: DateTime<Utc>, outage_start: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Ended,
            timestamp,
            outage_start,
            duration_seconds: Some(seconds_between(outage_start, timestamp)),
        }
    }

    pub fn unresolved(timestamp: DateTime<Utc>, outage_start: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Unresolved,
            timestamp,
            outage_start,
            duration_seconds: Some(seconds_between(outage_start, timestamp)),
        }
    }
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ended_duration_is_exact() {
        let start = Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap();
        let end = start + chrono::Duration::milliseconds(4500);

        let event = OutageEvent::ended(end, start);
        assert_eq!(event.duration_seconds, Some(4.5));
    }

    #[test]
    fn test_started_has_no_duration() {
        let start = Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap();
        let event = OutageEvent::started(start + chrono::Duration::seconds(2), start);
        assert_eq!(event.duration_seconds, None);

        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("duration_seconds"));
    }
}
