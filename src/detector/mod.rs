//! Outage detection subsystem.
//!
//! # States
//! - Stable: network reachable, no failure sequence in progress
//! - Suspect: fast check failed, detailed checks deciding whether it is real
//! - OutageConfirmed: enough consecutive failures, outage declared
//!
//! # State Transitions
//! ```text
//! Stable → Suspect: fast check fails (records the outage start time)
//! Suspect → Stable: fast or detailed check passes (silent, nothing confirmed)
//! Suspect → OutageConfirmed: consecutive failures reach the threshold (Started)
//! OutageConfirmed → Stable: fast check passes (Ended, with duration)
//! ```
//!
//! # Design Decisions
//! - The detector is pure: timestamps arrive with each sample, no clock reads
//! - A single dropped probe never produces an event (the Suspect stage)
//! - The outage start is the first failure, not the confirmation tick
//! - The minor-interval tracker runs beside the detector on the same
//!   probe stream and never gates it

pub mod event;
pub mod outage;
pub mod window;

pub use event::{EventKind, OutageEvent};
pub use outage::{Mode, OutageDetector, TickSample};
pub use window::{IntervalTracker, WindowSummary};
