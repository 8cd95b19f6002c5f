//! The tick loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};

use crate::config::MonitorConfig;
use crate::detector::event::{EventKind, OutageEvent};
use crate::detector::outage::{OutageDetector, TickSample};
use crate::detector::window::{IntervalTracker, WindowSummary};
use crate::observability::metrics;
use crate::probe::Prober;
use crate::sink::EventSink;

/// A record waiting to be persisted, in emission order.
enum Record {
    Event(OutageEvent),
    Window(WindowSummary),
}

/// Drives the probe/detect/persist cycle.
pub struct Monitor<P: Prober, S: EventSink> {
    config: MonitorConfig,
    prober: P,
    sink: S,
    detector: OutageDetector,
    windows: IntervalTracker,
    pending: VecDeque<Record>,
}

impl<P: Prober, S: EventSink> Monitor<P, S> {
    pub fn new(config: MonitorConfig, prober: P, sink: S) -> Self {
        let detector = OutageDetector::new(config.detector.clone());
        let windows = IntervalTracker::new(
            config.detector.minor_interval_secs,
            config.probe.interval_ms,
        );
        Self {
            config,
            prober,
            sink,
            detector,
            windows,
            pending: VecDeque::new(),
        }
    }

    /// Run until shutdown. One tick at a time; a tick that overruns the
    /// interval delays the next tick rather than overlapping it.
    pub async fn run(
        mut self,
        mut config_updates: mpsc::UnboundedReceiver<MonitorConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(
            interval_ms = self.config.probe.interval_ms,
            confirmation_threshold = self.config.detector.confirmation_threshold,
            "Monitor starting"
        );

        let mut ticker = time::interval(Duration::from_millis(self.config.probe.interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                Some(new_config) = config_updates.recv() => {
                    self.apply_config(new_config, &mut ticker);
                }
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.finalize();
    }

    async fn tick(&mut self) {
        let fast_ok = match self.prober.fast_check().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "Fast check could not run, counting as failure");
                false
            }
        };
        metrics::record_fast_check(fast_ok);

        let detailed_ok = if fast_ok {
            None
        } else {
            tracing::warn!("Fast check failed. Network may be down, kicking off deep check");
            let started = Instant::now();
            let ok = match self.prober.detailed_check().await {
                Ok(ok) => ok,
                Err(e) => {
                    tracing::warn!(error = %e, "Detailed check could not run, counting as failure");
                    false
                }
            };
            metrics::record_detailed_check(ok, started.elapsed());
            Some(ok)
        };

        let now = Utc::now();

        if let Some(event) = self.detector.on_tick(TickSample {
            at: now,
            fast_ok,
            detailed_ok,
        }) {
            self.note_event(&event);
            self.pending.push_back(Record::Event(event));
        }

        if let Some(window) = self.windows.on_tick(now, fast_ok) {
            tracing::info!(
                window_start = %window.window_start,
                failed_seconds = window.failed_seconds,
                "Interruptions recorded in minor interval"
            );
            self.pending.push_back(Record::Window(window));
        }

        self.flush();
    }

    fn note_event(&self, event: &OutageEvent) {
        match event.kind {
            EventKind::Started => {
                tracing::error!(outage_start = %event.outage_start, "New outage detected");
                metrics::record_outage_started();
            }
            EventKind::Ended => {
                tracing::info!(
                    duration_seconds = event.duration_seconds.unwrap_or(0.0),
                    "Saw recovery from network outage"
                );
                metrics::record_outage_resolved();
            }
            EventKind::Unresolved => {
                tracing::warn!(
                    outage_start = %event.outage_start,
                    duration_seconds = event.duration_seconds.unwrap_or(0.0),
                    "Shutting down with outage still open"
                );
                metrics::record_outage_resolved();
            }
        }
    }

    /// Drain the pending queue in order. Stops at the first failed write so
    /// records are never reordered or dropped; detection continues either way.
    fn flush(&mut self) {
        while let Some(record) = self.pending.front() {
            let result = match record {
                Record::Event(event) => self.sink.record_event(event),
                Record::Window(window) => self.sink.record_window(window),
            };
            match result {
                Ok(()) => {
                    self.pending.pop_front();
                }
                Err(e) => {
                    metrics::record_sink_failure();
                    tracing::warn!(
                        error = %e,
                        queued = self.pending.len(),
                        "Sink write failed, will retry next tick"
                    );
                    break;
                }
            }
        }
    }

    fn apply_config(&mut self, config: MonitorConfig, ticker: &mut time::Interval) {
        if config.probe.interval_ms != self.config.probe.interval_ms {
            *ticker = time::interval(Duration::from_millis(config.probe.interval_ms));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }
        self.prober.reload(&config.probe);
        self.detector.apply_config(config.detector.clone());
        self.windows
            .apply_config(config.detector.minor_interval_secs, config.probe.interval_ms);
        self.config = config;
        tracing::info!("Configuration reloaded");
    }

    fn finalize(&mut self) {
        if let Some(event) = self.detector.finalize(Utc::now()) {
            self.note_event(&event);
            self.pending.push_back(Record::Event(event));
        }
        self.flush();
        if !self.pending.is_empty() {
            tracing::error!(
                queued = self.pending.len(),
                "Exiting with unpersisted records"
            );
        }
    }
}
