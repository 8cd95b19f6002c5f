//! The monitoring runtime.
//!
//! # Data Flow
//! ```text
//! tokio interval tick (one at a time, overruns delay the next tick)
//!     → Prober::fast_check
//!     → on failure: Prober::detailed_check
//!     → OutageDetector::on_tick   (may emit an OutageEvent)
//!     → IntervalTracker::on_tick  (may emit a WindowSummary)
//!     → pending queue → EventSink (ordered, retried on failure)
//! ```
//!
//! # Design Decisions
//! - Detector state is owned by the runner; nothing else mutates it
//! - Sink failures never stall detection: records wait in an ordered
//!   queue and are retried on the next tick
//! - Config reloads apply between ticks; log file locations are fixed
//!   at startup

pub mod runner;

pub use runner::Monitor;
