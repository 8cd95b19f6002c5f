//! The outage detection state machine.
//!
//! # Responsibilities
//! - Classify a stream of probe results into confirmed outage intervals
//! - Suppress isolated failures (a single dropped probe is not an outage)
//! - Emit exactly one Started per confirmation and one Ended per recovery
//!
//! # Design Decisions
//! - Pure state transitions: no I/O, no clock reads, timestamps come in
//!   with each sample, so identical tick sequences replay identically
//! - The detailed check, not the fast check, is the authority for
//!   confirmation; the fast check only triggers escalation
//! - A missing detailed result on a failed tick counts as a failure
//!   (fail-safe toward detecting the outage)

use chrono::{DateTime, Utc};

use crate::config::DetectorConfig;
use crate::detector::event::{EventKind, OutageEvent};

/// Detector mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stable,
    Suspect,
    OutageConfirmed,
}

/// One tick's worth of probe observations.
///
/// `detailed_ok` is `Some` exactly when the runner escalated, i.e. when the
/// fast check failed.
#[derive(Debug, Clone, Copy)]
pub struct TickSample {
    pub at: DateTime<Utc>,
    pub fast_ok: bool,
    pub detailed_ok: Option<bool>,
}

/// The outage detector.
///
/// Owns all working state between ticks; created once at process start in
/// `Stable` and mutated by exactly one caller (the tick loop).
///
/// Invariant: `current_outage_start` is set if and only if the mode is not
/// `Stable`.
#[derive(Debug)]
pub struct OutageDetector {
    config: DetectorConfig,
    mode: Mode,
    /// Failed observations since the last success: the fast failure that
    /// triggered escalation plus each confirmed detailed failure.
    consecutive_failures: u32,
    current_outage_start: Option<DateTime<Utc>>,
    last_event: Option<OutageEvent>,
}

impl OutageDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            mode: Mode::Stable,
            consecutive_failures: 0,
            current_outage_start: None,
            last_event: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_outage_start(&self) -> Option<DateTime<Utc>> {
        self.current_outage_start
    }

    pub fn last_event(&self) -> Option<&OutageEvent> {
        self.last_event.as_ref()
    }

    /// Replace the detection settings. Takes effect on the next tick; never
    /// touches in-flight counters.
    pub fn apply_config(&mut self, config: DetectorConfig) {
        self.config = config;
    }

    /// Advance the state machine by one tick.
    ///
    /// Returns the lifecycle event this tick produced, if any.
    pub fn on_tick(&mut self, sample: TickSample) -> Option<OutageEvent> {
        if sample.fast_ok {
            return self.on_success(sample.at);
        }

        if self.mode == Mode::Stable {
            // First failure: record the onset and escalate. The detailed
            // result of this same tick is processed below.
            self.mode = Mode::Suspect;
            self.consecutive_failures = 1;
            self.current_outage_start = Some(sample.at);
        }

        let detailed_ok = sample.detailed_ok.unwrap_or(false);

        match self.mode {
            Mode::Stable => None,
            Mode::Suspect => {
                if detailed_ok {
                    // False alarm; nothing was confirmed, recover silently.
                    tracing::debug!("False alarm, detailed check passed; no outage");
                    self.clear();
                    None
                } else {
                    self.consecutive_failures += 1;
                    if self.consecutive_failures >= self.config.confirmation_threshold {
                        self.mode = Mode::OutageConfirmed;
                        let start = self.current_outage_start.unwrap_or(sample.at);
                        Some(self.emit(OutageEvent::started(sample.at, start)))
                    } else {
                        None
                    }
                }
            }
            // Outage continues; duration is computed at resolution only.
            Mode::OutageConfirmed => None,
        }
    }

    /// Shutdown hook: close the books on an outage that never resolved.
    ///
    /// Emits a synthetic Unresolved event iff an outage is currently
    /// confirmed, then returns to `Stable`.
    pub fn finalize(&mut self, at: DateTime<Utc>) -> Option<OutageEvent> {
        let event = if self.mode == Mode::OutageConfirmed {
            let start = self.current_outage_start.unwrap_or(at);
            Some(self.emit(OutageEvent::unresolved(at, start)))
        } else {
            None
        };
        self.clear();
        event
    }

    fn on_success(&mut self, at: DateTime<Utc>) -> Option<OutageEvent> {
        match self.mode {
            Mode::Stable => None,
            Mode::Suspect => {
                // The sequence never reached confirmation: silent recovery.
                self.clear();
                None
            }
            Mode::OutageConfirmed => {
                let start = self.current_outage_start.unwrap_or(at);
                self.clear();
                Some(self.emit(OutageEvent::ended(at, start)))
            }
        }
    }

    fn emit(&mut self, event: OutageEvent) -> OutageEvent {
        // Started must alternate with Ended/Unresolved.
        debug_assert!(match event.kind {
            EventKind::Started => !matches!(
                self.last_event.as_ref().map(|e| e.kind),
                Some(EventKind::Started)
            ),
            EventKind::Ended | EventKind::Unresolved => matches!(
                self.last_event.as_ref().map(|e| e.kind),
                Some(EventKind::Started)
            ),
        });
        self.last_event = Some(event.clone());
        event
    }

    fn clear(&mut self) {
        self.mode = Mode::Stable;
        self.consecutive_failures = 0;
        self.current_outage_start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(tick: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap() + chrono::Duration::seconds(tick)
    }

    fn detector(threshold: u32) -> OutageDetector {
        OutageDetector::new(DetectorConfig {
            confirmation_threshold: threshold,
            ..DetectorConfig::default()
        })
    }

    /// Feed a tick script: Some(b) = fast failed, detailed returned b;
    /// None = fast succeeded.
    fn run(detector: &mut OutageDetector, script: &[Option<bool>]) -> Vec<OutageEvent> {
        script
            .iter()
            .enumerate()
            .filter_map(|(i, detailed)| {
                detector.on_tick(TickSample {
                    at: ts(i as i64),
                    fast_ok: detailed.is_none(),
                    detailed_ok: *detailed,
                })
            })
            .collect()
    }

    #[test]
    fn test_isolated_failure_produces_no_events() {
        let mut d = detector(3);
        let events = run(&mut d, &[None, Some(false), None, None]);
        assert!(events.is_empty());
        assert_eq!(d.mode(), Mode::Stable);
    }

    #[test]
    fn test_false_alarm_recovers_silently() {
        let mut d = detector(3);
        let events = run(&mut d, &[None, Some(true), None]);
        assert!(events.is_empty());
        assert_eq!(d.mode(), Mode::Stable);
        assert_eq!(d.current_outage_start(), None);
    }

    #[test]
    fn test_threshold_scenario() {
        // threshold=3: [ok, fail, fail, fail, ok]
        let mut d = detector(3);
        let events = run(
            &mut d,
            &[None, Some(false), Some(false), Some(false), None],
        );

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Started);
        assert_eq!(events[0].timestamp, ts(2));
        assert_eq!(events[0].outage_start, ts(1));
        assert_eq!(events[1].kind, EventKind::Ended);
        assert_eq!(events[1].timestamp, ts(4));
        assert_eq!(events[1].outage_start, ts(1));
        assert_eq!(events[1].duration_seconds, Some(3.0));
    }

    #[test]
    fn test_outage_start_is_first_failure() {
        let mut d = detector(5);
        let script = [None, Some(false), Some(false), Some(false), Some(false)];
        let events = run(&mut d, &script);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Started);
        assert_eq!(events[0].outage_start, ts(1));
        // Confirmed on the tick the count reached 5, not when it began.
        assert_eq!(events[0].timestamp, ts(4));
    }

    #[test]
    fn test_missing_detailed_result_counts_as_failure() {
        let mut d = detector(3);
        let mut events = Vec::new();
        for i in 0..3 {
            events.extend(d.on_tick(TickSample {
                at: ts(i),
                fast_ok: false,
                detailed_ok: None,
            }));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Started);
    }

    #[test]
    fn test_no_repeat_events_while_outage_continues() {
        let mut d = detector(2);
        let events = run(
            &mut d,
            &[Some(false), Some(false), Some(false), Some(false)],
        );
        assert_eq!(events.len(), 1);
        assert_eq!(d.mode(), Mode::OutageConfirmed);
    }

    #[test]
    fn test_started_and_ended_alternate_across_outages() {
        let mut d = detector(2);
        let script = [
            Some(false), // outage 1 confirmed (threshold 2: fast + detailed)
            Some(false),
            None, // outage 1 ends
            None,
            Some(false), // outage 2 confirmed
            Some(false),
            None, // outage 2 ends
        ];
        let events = run(&mut d, &script);

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Started,
                EventKind::Ended,
                EventKind::Started,
                EventKind::Ended
            ]
        );
        // The second outage's start is its own first failure.
        assert_eq!(events[2].outage_start, ts(4));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let script = [
            None,
            Some(false),
            Some(true),
            Some(false),
            Some(false),
            None,
            Some(false),
        ];
        let events_a = run(&mut detector(2), &script);
        let events_b = run(&mut detector(2), &script);
        assert_eq!(events_a, events_b);
    }

    #[test]
    fn test_threshold_of_one_confirms_immediately() {
        let mut d = detector(1);
        let events = run(&mut d, &[Some(false)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Started);
        assert_eq!(events[0].outage_start, ts(0));
        assert_eq!(events[0].timestamp, ts(0));
    }

    #[test]
    fn test_invariant_outage_start_tracks_mode() {
        let mut d = detector(3);
        let script = [None, Some(false), Some(false), Some(false), None, None];
        for (i, detailed) in script.iter().enumerate() {
            d.on_tick(TickSample {
                at: ts(i as i64),
                fast_ok: detailed.is_none(),
                detailed_ok: *detailed,
            });
            assert_eq!(
                d.current_outage_start().is_some(),
                d.mode() != Mode::Stable
            );
        }
    }

    #[test]
    fn test_finalize_emits_unresolved_for_open_outage() {
        let mut d = detector(2);
        run(&mut d, &[Some(false), Some(false)]);
        assert_eq!(d.mode(), Mode::OutageConfirmed);

        let event = d.finalize(ts(10)).unwrap();
        assert_eq!(event.kind, EventKind::Unresolved);
        assert_eq!(event.outage_start, ts(0));
        assert_eq!(event.duration_seconds, Some(10.0));
        assert_eq!(d.mode(), Mode::Stable);
    }

    #[test]
    fn test_finalize_is_silent_when_nothing_confirmed() {
        let mut d = detector(3);
        run(&mut d, &[Some(false)]);
        assert_eq!(d.mode(), Mode::Suspect);
        assert!(d.finalize(ts(5)).is_none());
        assert_eq!(d.mode(), Mode::Stable);
    }

    #[test]
    fn test_last_event_tracks_emissions() {
        let mut d = detector(2);
        run(&mut d, &[Some(false), Some(false)]);
        assert_eq!(d.last_event().map(|e| e.kind), Some(EventKind::Started));

        run(&mut d, &[None]);
        assert_eq!(d.last_event().map(|e| e.kind), Some(EventKind::Ended));
    }
}
