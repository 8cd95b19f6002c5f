//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Start monitor loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → runner finalizes open outage → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - A clean shutdown stops scheduling ticks; the in-flight tick resolves
//! - An outage still open at shutdown is closed with an Unresolved event
//!   rather than silently lost

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
