//! Core config directory watcher implementation.
//!
//! Contains the [`ConfigWatcher`] struct that monitors the source files of a
//! config directory, and the [`WatchStream`] that yields debounced changes.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use stratum_common::ConfigError;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Window within which successive change events are coalesced.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a set of source files inside one directory.
pub struct ConfigWatcher {
    directory: PathBuf,
    file_names: Vec<OsString>,
}

impl ConfigWatcher {
    /// Create a watcher for `file_names` inside `directory`.
    pub fn new<I, S>(directory: PathBuf, file_names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        if !directory.is_dir() {
            warn!(
                "config directory {} does not exist yet, watch registration will fail",
                directory.display()
            );
        }

        Ok(Self {
            directory,
            file_names: file_names.into_iter().map(Into::into).collect(),
        })
    }

    /// Register the watch and return the stream of changes.
    ///
    /// Registration happens before this returns, so any write made after a
    /// successful call is observed.
    pub fn start(&self) -> Result<WatchStream, ConfigError> {
        let (notify_tx, notify_rx) = mpsc::channel::<PathBuf>(16);
        let file_names = self.file_names.clone();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }

                    let changed = event.paths.into_iter().find(|p| {
                        p.file_name()
                            .map(|n| file_names.iter().any(|f| f.as_os_str() == n))
                            .unwrap_or(false)
                    });

                    if let Some(path) = changed {
                        debug!("config source change detected: {}", path.display());
                        let _ = notify_tx.try_send(path);
                    }
                }
                Err(e) => {
                    error!("file watcher error: {e}");
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&self.directory, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!(
                    "failed to watch {}: {e}",
                    self.directory.display()
                ))
            })?;

        info!("watching config directory {}", self.directory.display());
        Ok(WatchStream {
            _watcher: watcher,
            rx: notify_rx,
        })
    }
}

/// Debounced change notifications from a registered [`ConfigWatcher`].
///
/// Dropping the stream removes the watch.
pub struct WatchStream {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<PathBuf>,
}

impl WatchStream {
    /// Wait for the next change, coalescing bursts within [`DEBOUNCE`].
    ///
    /// Returns the most recently changed path of the burst, or `None` once
    /// the underlying watcher has shut down.
    pub async fn next_change(&mut self) -> Option<PathBuf> {
        let mut last = self.rx.recv().await?;

        let debounce = tokio::time::sleep(DEBOUNCE);
        tokio::pin!(debounce);

        loop {
            tokio::select! {
                _ = &mut debounce => break,
                msg = self.rx.recv() => match msg {
                    Some(path) => last = path,
                    None => break,
                },
            }
        }

        Some(last)
    }
}
