//! Reachability probing subsystem.
//!
//! # Data Flow
//! ```text
//! tick loop
//!     → fast_check()            dns.rs: one A lookup, resolvers cycled
//!     → on failure: detailed_check()
//!         → ping.rs             ICMP echo per configured target
//!         → web.rs              HTTP HEAD per configured URL
//!         → quorum: down only when failures exceed the configured ratio
//! ```
//!
//! # Design Decisions
//! - Every probe has a bounded deadline; timeouts are failures, never errors
//! - Errors (`ProbeError`) mean the probe could not execute at all; the
//!   runner logs them distinctly and treats the probe as failed
//! - Target lists are hot-swappable without restarting the tick loop

pub mod dns;
pub mod ping;
pub mod system;
pub mod web;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ProbeConfig;

/// Error type for probes that could not execute.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run ping: {0}")]
    Ping(#[from] std::io::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A pluggable reachability check.
///
/// Both checks complete within a bounded timeout and report a plain
/// reachable/unreachable verdict.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Cheap, frequent probe used to detect candidate failures.
    async fn fast_check(&self) -> Result<bool, ProbeError>;

    /// Thorough, slower probe used to confirm a candidate failure is real.
    async fn detailed_check(&self) -> Result<bool, ProbeError>;

    /// Apply a new probe configuration. Implementations without live
    /// reconfiguration can ignore this.
    fn reload(&self, _config: &ProbeConfig) {}
}

pub use system::SystemProber;
