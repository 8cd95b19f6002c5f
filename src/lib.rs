//! Network Stability Monitor
//!
//! Watches network reachability from a single host, separates transient
//! blips from sustained outages, and keeps a durable log of outage events.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │               NETWORK MONITOR                 │
//!                  │                                               │
//!   tick (1s)      │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ───────────────┼─▶│  probe  │──▶│ detector │──▶│   sink    │──┼──▶ outages.log
//!                  │  │ dns/icmp│   │  state   │   │ append-   │  │    windows.log
//!                  │  │  /http  │   │ machine  │   │  only     │  │    events.jsonl
//!                  │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                  │                     │                        │
//!                  │                ┌────▼─────┐                  │
//!                  │                │ interval │                  │
//!                  │                │ tracker  │                  │
//!                  │                └──────────┘                  │
//!                  │                                               │
//!                  │  ┌─────────────────────────────────────────┐ │
//!                  │  │          Cross-Cutting Concerns          │ │
//!                  │  │  ┌────────┐ ┌───────────┐ ┌───────────┐  │ │
//!                  │  │  │ config │ │ lifecycle │ │observa-   │  │ │
//!                  │  │  │ reload │ │ shutdown  │ │ bility    │  │ │
//!                  │  │  └────────┘ └───────────┘ └───────────┘  │ │
//!                  │  └─────────────────────────────────────────┘ │
//!                  └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod detector;
pub mod probe;

// Persistence & runtime
pub mod monitor;
pub mod sink;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::Monitor;
