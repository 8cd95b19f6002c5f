//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, ratio within bounds)
//! - Check that probe target lists can actually confirm an outage
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::IpAddr;
use url::Url;

use crate::config::schema::MonitorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    ZeroInterval,
    ZeroTimeout,
    ZeroThreshold,
    NoDnsServers,
    NoDetailedTargets,
    BadDnsAddress(String),
    BadHttpTarget(String),
    BadFailureRatio(f64),
    MinorIntervalTooShort { minor_secs: u64, interval_ms: u64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroInterval => write!(f, "probe.interval_ms must be > 0"),
            ValidationError::ZeroTimeout => write!(f, "probe.timeout_secs must be > 0"),
            ValidationError::ZeroThreshold => {
                write!(f, "detector.confirmation_threshold must be > 0")
            }
            ValidationError::NoDnsServers => {
                write!(f, "probe.dns_servers must list at least one resolver")
            }
            ValidationError::NoDetailedTargets => write!(
                f,
                "probe.ping_targets and probe.http_targets are both empty; the detailed check needs at least one target"
            ),
            ValidationError::BadDnsAddress(addr) => {
                write!(f, "probe.dns_servers address '{}' is not an IP address", addr)
            }
            ValidationError::BadHttpTarget(url) => {
                write!(f, "probe.http_targets entry '{}' is not a valid http(s) URL", url)
            }
            ValidationError::BadFailureRatio(ratio) => {
                write!(f, "probe.failure_ratio {} must be within [0.0, 1.0)", ratio)
            }
            ValidationError::MinorIntervalTooShort { minor_secs, interval_ms } => write!(
                f,
                "detector.minor_interval_secs {}s is shorter than one probe interval ({}ms)",
                minor_secs, interval_ms
            ),
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.detector.confirmation_threshold == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }

    if config.probe.dns_servers.is_empty() {
        errors.push(ValidationError::NoDnsServers);
    }
    for server in &config.probe.dns_servers {
        if server.address.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::BadDnsAddress(server.address.clone()));
        }
    }

    if config.probe.ping_targets.is_empty() && config.probe.http_targets.is_empty() {
        errors.push(ValidationError::NoDetailedTargets);
    }
    for target in &config.probe.http_targets {
        let ok = Url::parse(target)
            .map(|u| u.scheme() == "http" || u.scheme() == "https")
            .unwrap_or(false);
        if !ok {
            errors.push(ValidationError::BadHttpTarget(target.clone()));
        }
    }

    if !(0.0..1.0).contains(&config.probe.failure_ratio) {
        errors.push(ValidationError::BadFailureRatio(config.probe.failure_ratio));
    }

    if config.detector.minor_interval_secs * 1000 < config.probe.interval_ms {
        errors.push(ValidationError::MinorIntervalTooShort {
            minor_secs: config.detector.minor_interval_secs,
            interval_ms: config.probe.interval_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MonitorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MonitorConfig::default();
        config.probe.interval_ms = 0;
        config.probe.failure_ratio = 1.5;
        config.detector.confirmation_threshold = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_rejects_bad_targets() {
        let mut config = MonitorConfig::default();
        config.probe.dns_servers[0].address = "not-an-ip".into();
        config.probe.http_targets.push("ftp://example.com/".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_rejects_empty_detailed_targets() {
        let mut config = MonitorConfig::default();
        config.probe.ping_targets.clear();
        config.probe.http_targets.clear();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::NoDetailedTargets));
    }
}
