//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_probes_total` (counter): fast checks by result
//! - `monitor_detailed_checks_total` (counter): deep checks by result
//! - `monitor_detailed_check_duration_seconds` (histogram): deep check latency
//! - `monitor_outages_total` (counter): confirmed outages
//! - `monitor_outage_active` (gauge): 1 while an outage is confirmed
//! - `monitor_sink_write_failures_total` (counter): records that needed a retry

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter. Must run inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe();
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => {
            tracing::error!("Failed to install metrics exporter: {}", e);
        }
    }
}

fn describe() {
    describe_counter!("monitor_probes_total", "Fast reachability checks by result");
    describe_counter!("monitor_detailed_checks_total", "Detailed checks by result");
    describe_histogram!(
        "monitor_detailed_check_duration_seconds",
        "Detailed check wall time"
    );
    describe_counter!("monitor_outages_total", "Confirmed outages");
    describe_gauge!("monitor_outage_active", "1 while an outage is confirmed");
    describe_counter!(
        "monitor_sink_write_failures_total",
        "Sink writes that failed and were queued for retry"
    );
}

pub fn record_fast_check(ok: bool) {
    let result = if ok { "ok" } else { "fail" };
    counter!("monitor_probes_total", "result" => result).increment(1);
}

pub fn record_detailed_check(ok: bool, elapsed: Duration) {
    let result = if ok { "ok" } else { "fail" };
    counter!("monitor_detailed_checks_total", "result" => result).increment(1);
    histogram!("monitor_detailed_check_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_outage_started() {
    counter!("monitor_outages_total").increment(1);
    gauge!("monitor_outage_active").set(1.0);
}

pub fn record_outage_resolved() {
    gauge!("monitor_outage_active").set(0.0);
}

pub fn record_sink_failure() {
    counter!("monitor_sink_write_failures_total").increment(1);
}
