//! Network stability monitor daemon.
//!
//! Probes reachability once per interval, confirms suspected failures with
//! a deeper multi-target check, and appends confirmed outages to durable
//! log files. Intended to run unattended for weeks at a time.

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use network_monitor::config::loader::load_config;
use network_monitor::config::watcher::watch_config;
use network_monitor::lifecycle::signals;
use network_monitor::observability::{logging, metrics};
use network_monitor::probe::SystemProber;
use network_monitor::sink::FileSink;
use network_monitor::{Monitor, MonitorConfig, Shutdown};

#[derive(Parser)]
#[command(name = "network-monitor")]
#[command(about = "Long-running network stability monitor", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted; when given,
    /// the file is watched and changes apply without a restart.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("network-monitor v0.1.0 starting");
    tracing::info!(
        interval_ms = config.probe.interval_ms,
        confirmation_threshold = config.detector.confirmation_threshold,
        outage_log = ?config.log.outage_log,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let prober = SystemProber::new(&config.probe)?;
    let sink = FileSink::new(config.log.clone());

    // The watcher must stay alive for the life of the process; without a
    // config file the update channel simply never fires.
    let (_watcher, _standin_tx, config_updates) = match &cli.config {
        Some(path) => {
            let (watcher, rx) = watch_config(path)?;
            (Some(watcher), None, rx)
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (None, Some(tx), rx)
        }
    };

    let shutdown = Shutdown::new();
    let monitor = Monitor::new(config, prober, sink);
    let monitor_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        monitor.run(config_updates, monitor_shutdown).await;
    });

    signals::shutdown_requested().await;
    shutdown.trigger();
    handle.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
