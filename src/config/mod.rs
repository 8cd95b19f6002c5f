//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → shared with the monitor runner and probers
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new MonitorConfig sent over the update channel
//!     → runner applies it on the next tick
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::DetectorConfig;
pub use schema::LogConfig;
pub use schema::MonitorConfig;
pub use schema::ProbeConfig;
