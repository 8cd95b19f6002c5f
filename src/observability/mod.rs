//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, journal)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; level from config, RUST_LOG wins
//! - Metric updates are cheap (atomic increments)
//! - The metrics endpoint is off by default; the monitor's primary output
//!   stays the append-only log files

pub mod logging;
pub mod metrics;
