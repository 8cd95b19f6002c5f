//! Minor-interval tracking for brief interruptions.
//!
//! # Responsibilities
//! - Bucket probe failures into short fixed windows
//! - Record, per window, whether any interruption occurred and its
//!   approximate total failed duration
//!
//! # Design Decisions
//! - Runs beside the outage detector on the same fast-probe stream;
//!   never triggers detailed checks and never gates the detector
//! - Windows align to the first observed tick, not wall-clock minutes
//! - Windows without failures close silently (summaries stay lightweight)

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Per-window interruption summary, recorded for later pattern analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,

    /// Approximate failed duration: failed ticks times the probe interval.
    pub failed_seconds: f64,

    pub failed_ticks: u32,
}

/// Buckets the probe stream into fixed windows.
#[derive(Debug)]
pub struct IntervalTracker {
    window: Duration,
    tick_interval: Duration,
    window_start: Option<DateTime<Utc>>,
    failed_ticks: u32,
}

impl IntervalTracker {
    pub fn new(window_secs: u64, interval_ms: u64) -> Self {
        Self {
            window: Duration::seconds(window_secs as i64),
            tick_interval: Duration::milliseconds(interval_ms as i64),
            window_start: None,
            failed_ticks: 0,
        }
    }

    /// Change the window geometry. Applies to the window in progress.
    pub fn apply_config(&mut self, window_secs: u64, interval_ms: u64) {
        self.window = Duration::seconds(window_secs as i64);
        self.tick_interval = Duration::milliseconds(interval_ms as i64);
    }

    /// Observe one fast-check result.
    ///
    /// Returns the summary of the window that just closed, if the tick
    /// crossed a boundary and the window contained at least one failure.
    pub fn on_tick(&mut self, at: DateTime<Utc>, ok: bool) -> Option<WindowSummary> {
        let start = *self.window_start.get_or_insert(at);

        let mut summary = None;
        if at - start >= self.window {
            if self.failed_ticks > 0 {
                summary = Some(WindowSummary {
                    window_start: start,
                    window_end: start + self.window,
                    failed_seconds: self.failed_ticks as f64
                        * self.tick_interval.num_milliseconds() as f64
                        / 1000.0,
                    failed_ticks: self.failed_ticks,
                });
            }

            // Advance past any windows the loop skipped entirely.
            let elapsed = (at - start).num_milliseconds();
            let window_ms = self.window.num_milliseconds().max(1);
            let crossed = elapsed / window_ms;
            self.window_start = Some(start + self.window * crossed as i32);
            self.failed_ticks = 0;
        }

        if !ok {
            self.failed_ticks += 1;
        }
        summary
    }
}
