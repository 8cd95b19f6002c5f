//! Event persistence subsystem.
//!
//! # Data Flow
//! ```text
//! runner emits OutageEvent / WindowSummary
//!     → EventSink::record_* (synchronous, append-only, order-preserving)
//!         → file.rs   durable log files
//!         → memory.rs in-process buffer (tests)
//! ```
//!
//! # Design Decisions
//! - Sinks never reorder or drop records; the runner retries failed writes
//!   in order and keeps detecting regardless
//! - Writes are synchronous appends; a tick's records are flushed before
//!   the next tick runs

pub mod file;
pub mod memory;

use thiserror::Error;

use crate::detector::event::OutageEvent;
use crate::detector::window::WindowSummary;

/// Error type for record persistence.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only destination for monitor records.
pub trait EventSink: Send {
    /// Persist one outage lifecycle event.
    fn record_event(&mut self, event: &OutageEvent) -> Result<(), SinkError>;

    /// Persist one minor-interval summary.
    fn record_window(&mut self, window: &WindowSummary) -> Result<(), SinkError>;
}

pub use file::FileSink;
pub use memory::MemorySink;
