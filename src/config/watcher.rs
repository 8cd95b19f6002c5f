//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::MonitorConfig;

/// Watch a configuration file and push validated reloads to the runner.
///
/// Returns the watcher (kept alive by the caller) and the update receiver.
/// A change that fails to load or validate is logged and the current
/// configuration stays in effect.
pub fn watch_config(
    path: &Path,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<MonitorConfig>), notify::Error> {
    let (tx, rx) = mpsc::unbounded_channel();
    let watched: PathBuf = path.to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    tracing::info!(path = ?watched, "Config file change detected, reloading");
                    match load_config(&watched) {
                        Ok(new_config) => {
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to reload config: {}. Keeping current configuration.",
                                e
                            );
                        }
                    }
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    )?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    tracing::info!(path = ?path, "Config watcher started");

    Ok((watcher, rx))
}
