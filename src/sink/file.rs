//! Append-only file persistence.
//!
//! Three files, all plain append:
//! - event log: every `OutageEvent` as one JSON line, written the moment
//!   the event is emitted
//! - outage log: `<ISO8601 start> <ISO8601 end> <duration_seconds>` per
//!   resolved outage; a trailing `unresolved` marks an outage that was
//!   still open at shutdown
//! - window log: `<ISO8601 start> <ISO8601 end> <failed_seconds>` per
//!   minor interval that saw failures

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::SecondsFormat;

use crate::config::LogConfig;
use crate::detector::event::{EventKind, OutageEvent};
use crate::detector::window::WindowSummary;
use crate::sink::{EventSink, SinkError};

/// Durable sink backed by append-only log files.
pub struct FileSink {
    config: LogConfig,
}

impl FileSink {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    fn append_line(path: &Path, line: &str) -> Result<(), SinkError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

fn iso8601(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl EventSink for FileSink {
    fn record_event(&mut self, event: &OutageEvent) -> Result<(), SinkError> {
        let json = serde_json::to_string(event)?;
        Self::append_line(&self.config.event_log, &json)?;

        // The outage log holds one line per closed outage.
        match event.kind {
            EventKind::Started => {}
            EventKind::Ended => {
                let line = format!(
                    "{} {} {}",
                    iso8601(event.outage_start),
                    iso8601(event.timestamp),
                    event.duration_seconds.unwrap_or(0.0)
                );
                Self::append_line(&self.config.outage_log, &line)?;
            }
            EventKind::Unresolved => {
                let line = format!(
                    "{} {} {} unresolved",
                    iso8601(event.outage_start),
                    iso8601(event.timestamp),
                    event.duration_seconds.unwrap_or(0.0)
                );
                Self::append_line(&self.config.outage_log, &line)?;
            }
        }
        Ok(())
    }

    fn record_window(&mut self, window: &WindowSummary) -> Result<(), SinkError> {
        let line = format!(
            "{} {} {}",
            iso8601(window.window_start),
            iso8601(window.window_end),
            window.failed_seconds
        );
        Self::append_line(&self.config.window_log, &line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn sink_in(dir: &Path) -> FileSink {
        FileSink::new(LogConfig {
            outage_log: dir.join("outages.log"),
            window_log: dir.join("windows.log"),
            event_log: dir.join("events.jsonl"),
        })
    }

    fn ts(secs: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 8, 30, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    #[test]
    fn test_started_goes_to_event_log_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.record_event(&OutageEvent::started(ts(3), ts(0))).unwrap();

        let events = std::fs::read_to_string(dir.path().join("events.jsonl")).unwrap();
        assert_eq!(events.lines().count(), 1);
        assert!(events.contains("\"Started\""));
        assert!(!dir.path().join("outages.log").exists());
    }

    #[test]
    fn test_ended_appends_outage_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.record_event(&OutageEvent::started(ts(3), ts(0))).unwrap();
        sink.record_event(&OutageEvent::ended(ts(45), ts(0))).unwrap();

        let outages = std::fs::read_to_string(dir.path().join("outages.log")).unwrap();
        assert_eq!(
            outages,
            "2025-04-02T08:30:00Z 2025-04-02T08:30:45Z 45\n"
        );
    }

    #[test]
    fn test_unresolved_is_marked() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.record_event(&OutageEvent::unresolved(ts(10), ts(0))).unwrap();

        let outages = std::fs::read_to_string(dir.path().join("outages.log")).unwrap();
        assert!(outages.trim_end().ends_with("unresolved"));
    }

    #[test]
    fn test_window_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = sink_in(dir.path());

        sink.record_window(&WindowSummary {
            window_start: ts(0),
            window_end: ts(120),
            failed_seconds: 2.5,
            failed_ticks: 5,
        })
        .unwrap();

        let windows = std::fs::read_to_string(dir.path().join("windows.log")).unwrap();
        assert_eq!(
            windows,
            "2025-04-02T08:30:00Z 2025-04-02T08:32:00Z 2.5\n"
        );
    }
}
