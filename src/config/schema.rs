//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the network monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Probe settings (cadence, timeouts, targets).
    pub probe: ProbeConfig,

    /// Outage detection settings.
    pub detector: DetectorConfig,

    /// Output log file locations.
    pub log: LogConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A DNS resolver paired with a hostname it can answer without recursion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsServerConfig {
    /// Resolver IP address (e.g., "1.0.0.1").
    pub address: String,

    /// Hostname to look up through this resolver.
    pub hostname: String,
}

/// A host probed with ICMP during the detailed check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PingTargetConfig {
    /// Hostname or IP to ping.
    pub host: String,

    /// Label used in logs.
    pub label: String,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Fast-check cadence in milliseconds.
    pub interval_ms: u64,

    /// Per-probe timeout in seconds (fast and detailed checks).
    pub timeout_secs: u64,

    /// Resolver pairs cycled through by the fast check.
    /// Best to pick remotes and nothing on the local network.
    pub dns_servers: Vec<DnsServerConfig>,

    /// ICMP targets for the detailed check.
    pub ping_targets: Vec<PingTargetConfig>,

    /// HTTP URLs queried with HEAD during the detailed check.
    /// Plain http on purpose for faster handshakes.
    pub http_targets: Vec<String>,

    /// Fraction of detailed checks that must fail before the network is
    /// considered down (0.25 = more than a quarter failing).
    pub failure_ratio: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            timeout_secs: 1,
            dns_servers: vec![
                dns_pair("1.0.0.1", "one.one.one.one"),
                dns_pair("8.8.4.4", "dns.google"),
                dns_pair("208.67.222.123", "familyshield.opendns.com"),
                dns_pair("149.112.112.112", "dns.quad9.net"),
                dns_pair("94.140.14.141", "unfiltered.adguard-dns.com"),
            ],
            ping_targets: vec![
                ping_target("www.google.com", "Google"),
                ping_target("www.amazon.com", "Amazon"),
                ping_target("www.microsoft.com", "Microsoft"),
                ping_target("192.168.1.1", "Local Network Gateway"),
            ],
            http_targets: vec![
                "http://www.google.com/".to_string(),
                "http://www.amazon.com/".to_string(),
                "http://www.microsoft.com/".to_string(),
            ],
            failure_ratio: 0.25,
        }
    }
}

fn dns_pair(address: &str, hostname: &str) -> DnsServerConfig {
    DnsServerConfig {
        address: address.to_string(),
        hostname: hostname.to_string(),
    }
}

fn ping_target(host: &str, label: &str) -> PingTargetConfig {
    PingTargetConfig {
        host: host.to_string(),
        label: label.to_string(),
    }
}

/// Outage detection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Consecutive confirmed failures required before declaring an outage.
    pub confirmation_threshold: u32,

    /// Length of the minor-interval windows in seconds, used to record
    /// brief interruptions for later pattern analysis.
    pub minor_interval_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confirmation_threshold: 3,
            minor_interval_secs: 120,
        }
    }
}

/// Output log file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Resolved outages, one line per outage.
    pub outage_log: PathBuf,

    /// Minor-interval summaries, one line per window with failures.
    pub window_log: PathBuf,

    /// Every lifecycle event as a JSON line.
    pub event_log: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            outage_log: PathBuf::from("outages.log"),
            window_log: PathBuf::from("windows.log"),
            event_log: PathBuf::from("events.jsonl"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
