//! DNS fast check.
//!
//! One A-record lookup per tick, cycling through the configured resolver
//! pairs. Each pair names a resolver IP and a hostname that resolver can
//! answer without a recursive lookup.

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::schema::DnsServerConfig;

struct DnsProbe {
    resolver: TokioAsyncResolver,
    address: String,
    hostname: String,
}

/// Cycles a single cheap DNS lookup across the configured resolvers.
pub struct DnsChecker {
    probes: Vec<DnsProbe>,
    cycle: AtomicUsize,
}

impl DnsChecker {
    pub fn new(servers: &[DnsServerConfig], timeout: Duration) -> Self {
        let probes = servers
            .iter()
            .filter_map(|server| {
                // Addresses are validated at config load; skip rather than
                // crash if one slips through.
                let ip: IpAddr = server.address.parse().ok()?;

                let nameserver =
                    NameServerConfig::new(SocketAddr::new(ip, 53), Protocol::Udp);
                let config = ResolverConfig::from_parts(None, vec![], vec![nameserver]);

                let mut opts = ResolverOpts::default();
                opts.timeout = timeout;
                opts.attempts = 1;
                opts.cache_size = 0;

                Some(DnsProbe {
                    resolver: TokioAsyncResolver::tokio(config, opts),
                    address: server.address.clone(),
                    hostname: server.hostname.clone(),
                })
            })
            .collect();

        Self {
            probes,
            cycle: AtomicUsize::new(0),
        }
    }

    /// Run one lookup against the next resolver in the cycle.
    pub async fn check(&self) -> bool {
        if self.probes.is_empty() {
            return false;
        }
        let idx = self.cycle.fetch_add(1, Ordering::Relaxed) % self.probes.len();
        let probe = &self.probes[idx];

        tracing::debug!(
            resolver = %probe.address,
            hostname = %probe.hostname,
            "Interval check"
        );

        match probe.resolver.lookup_ip(probe.hostname.as_str()).await {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                tracing::debug!(resolver = %probe.address, error = %e, "DNS lookup failed");
                false
            }
        }
    }
}
