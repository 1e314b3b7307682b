//! Configuration file watcher for hot reload.
//!
//! # Data Flow
//! ```text
//! notify event (modify / create)
//!     → debounce thread: wait until the file is quiet for `quiet`
//!     → reload_config (empty, unparsable or invalid files rejected)
//!     → validated GateConfig on the update channel
//! ```
//!
//! The debounce thread exits when the notify handle is dropped or the
//! update receiver goes away.

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::reload_config;
use crate::config::schema::GateConfig;
use crate::observability::metrics;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    quiet: Duration,
    update_tx: mpsc::UnboundedSender<GateConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// `quiet` is both the notify poll interval and how long the file must
    /// go without changes before it is reloaded. Returns the watcher and a
    /// receiver for validated configuration updates.
    pub fn new(path: &Path, quiet: Duration) -> (Self, mpsc::UnboundedReceiver<GateConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                quiet,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (change_tx, change_rx) = std_mpsc::channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let _ = change_tx.send(());
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(self.quiet),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        let path = self.path.clone();
        let quiet = self.quiet;
        let tx = self.update_tx;
        thread::Builder::new()
            .name("log-gate-config-watch".to_string())
            .spawn(move || debounce_reloads(&path, quiet, &change_rx, &tx))
            .map_err(notify::Error::io)?;

        tracing::info!(path = ?self.path, quiet_ms = quiet.as_millis() as u64, "Config watcher started");
        Ok(watcher)
    }
}

fn debounce_reloads(
    path: &Path,
    quiet: Duration,
    changes: &std_mpsc::Receiver<()>,
    tx: &mpsc::UnboundedSender<GateConfig>,
) {
    // Block for the first change of a burst.
    while changes.recv().is_ok() {
        loop {
            match changes.recv_timeout(quiet) {
                Ok(()) => continue,
                Err(std_mpsc::RecvTimeoutError::Timeout) => break,
                Err(std_mpsc::RecvTimeoutError::Disconnected) => return,
            }
        }

        tracing::info!(path = ?path, "Config file settled, reloading");
        match reload_config(path) {
            Ok(new_config) => {
                metrics::record_reload(true);
                if tx.send(new_config).is_err() {
                    tracing::debug!(path = ?path, "Config update receiver dropped, stopping watcher");
                    return;
                }
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(error = %e, "Failed to reload config, keeping current gate table");
            }
        }
    }
    tracing::debug!(path = ?path, "Config watcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("log-gate-debounce-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_burst_reloads_once_after_quiet() {
        let path = temp_path("burst");
        std::fs::write(&path, "[categories]\nstart = \"off\"\n").unwrap();

        let (change_tx, change_rx) = std_mpsc::channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = {
            let path = path.clone();
            thread::spawn(move || debounce_reloads(&path, Duration::from_millis(50), &change_rx, &tx))
        };

        for _ in 0..5 {
            change_tx.send(()).unwrap();
        }
        thread::sleep(Duration::from_millis(300));
        drop(change_tx);
        worker.join().unwrap();

        let update = rx.try_recv().unwrap();
        assert_eq!(update.categories.child("start").unwrap().value(), "off");
        assert!(rx.try_recv().is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_file_is_never_sent() {
        let path = temp_path("empty");
        std::fs::write(&path, "").unwrap();

        let (change_tx, change_rx) = std_mpsc::channel();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = {
            let path = path.clone();
            thread::spawn(move || debounce_reloads(&path, Duration::from_millis(20), &change_rx, &tx))
        };

        change_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(200));
        drop(change_tx);
        worker.join().unwrap();

        assert!(rx.try_recv().is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_stops_when_receiver_dropped() {
        let path = temp_path("dropped");
        std::fs::write(&path, "[categories]\nstop = \"on\"\n").unwrap();

        let (change_tx, change_rx) = std_mpsc::channel();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let worker = {
            let path = path.clone();
            thread::spawn(move || debounce_reloads(&path, Duration::from_millis(20), &change_rx, &tx))
        };

        change_tx.send(()).unwrap();
        // The worker returns on its own; the change sender is still alive.
        worker.join().unwrap();
        drop(change_tx);

        let _ = std::fs::remove_file(&path);
    }
}
