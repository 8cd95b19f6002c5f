//! The system prober: DNS fast check plus ICMP/HTTP deep check.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use futures_util::future::{join, join_all};

use crate::config::schema::PingTargetConfig;
use crate::config::ProbeConfig;
use crate::probe::dns::DnsChecker;
use crate::probe::ping::ping_host;
use crate::probe::web::website_alive;
use crate::probe::{ProbeError, Prober};

/// Everything one probe pass needs, swapped wholesale on config reload so
/// in-flight checks keep a consistent view.
struct ProberInner {
    dns: DnsChecker,
    client: reqwest::Client,
    ping_targets: Vec<PingTargetConfig>,
    http_targets: Vec<String>,
    failure_ratio: f64,
    timeout: Duration,
}

impl ProberInner {
    fn build(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            dns: DnsChecker::new(&config.dns_servers, timeout),
            client,
            ping_targets: config.ping_targets.clone(),
            http_targets: config.http_targets.clone(),
            failure_ratio: config.failure_ratio,
            timeout,
        })
    }

    /// Probe every target and weigh the failures, to verify whether the
    /// network looks down for most things or only a few.
    async fn deep_check(&self) -> bool {
        let pings = self.ping_targets.iter().map(|target| async move {
            match ping_host(&target.host, self.timeout).await {
                Ok(true) => {
                    tracing::debug!(target = %target.label, "Successful ICMP ping");
                    true
                }
                Ok(false) => {
                    tracing::warn!(target = %target.label, host = %target.host, "Failed ICMP ping");
                    false
                }
                Err(e) => {
                    tracing::warn!(target = %target.label, error = %e, "ICMP ping could not run");
                    false
                }
            }
        });

        let webs = self.http_targets.iter().map(|url| async move {
            let alive = website_alive(&self.client, url).await;
            if !alive {
                tracing::warn!(url = %url, "Failed web HEAD query");
            }
            alive
        });

        let (ping_results, web_results) = join(join_all(pings), join_all(webs)).await;
        let total = ping_results.len() + web_results.len();
        let failures = ping_results
            .iter()
            .chain(web_results.iter())
            .filter(|ok| !**ok)
            .count();

        tracing::debug!(
            total = total,
            failures = failures,
            "Deep check complete"
        );

        quorum_reachable(failures, total, self.failure_ratio)
    }
}

/// Reachable unless failures exceed the configured fraction of all checks.
fn quorum_reachable(failures: usize, total: usize, failure_ratio: f64) -> bool {
    if total == 0 {
        // No targets means nothing can vouch for the network.
        return false;
    }
    (failures as f64) <= (total as f64) * failure_ratio
}

/// Production prober backed by real DNS, ICMP and HTTP checks.
pub struct SystemProber {
    inner: ArcSwap<ProberInner>,
}

impl SystemProber {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        Ok(Self {
            inner: ArcSwap::from_pointee(ProberInner::build(config)?),
        })
    }
}

#[async_trait]
impl Prober for SystemProber {
    async fn fast_check(&self) -> Result<bool, ProbeError> {
        let inner = self.inner.load_full();
        Ok(inner.dns.check().await)
    }

    async fn detailed_check(&self) -> Result<bool, ProbeError> {
        let inner = self.inner.load_full();
        Ok(inner.deep_check().await)
    }

    fn reload(&self, config: &ProbeConfig) {
        match ProberInner::build(config) {
            Ok(inner) => {
                self.inner.store(Arc::new(inner));
                tracing::info!("Probe targets reloaded");
            }
            Err(e) => {
                tracing::error!("Failed to apply probe config: {}. Keeping current probers.", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quorum_tolerates_minority_failures() {
        // 11 checks at 0.25: up to 2 failures still count as reachable.
        assert!(quorum_reachable(0, 11, 0.25));
        assert!(quorum_reachable(2, 11, 0.25));
        assert!(!quorum_reachable(3, 11, 0.25));
        assert!(!quorum_reachable(11, 11, 0.25));
    }

    #[test]
    fn test_quorum_with_no_targets_is_down() {
        assert!(!quorum_reachable(0, 0, 0.25));
    }

    #[test]
    fn test_zero_ratio_fails_on_any_failure() {
        assert!(quorum_reachable(0, 4, 0.0));
        assert!(!quorum_reachable(1, 4, 0.0));
    }
}
