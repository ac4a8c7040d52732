//! Core reload manager implementation.
//!
//! Contains the [`ReloadManager`] struct, which owns the watch registration
//! and the background thread that recomputes the merge on change.

use crate::pipeline::ConfigLoader;
use crate::snapshot::MergedConfig;
use crate::watcher::{ConfigWatcher, WatchStream};
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::{Arc, Weak};
use stratum_common::ConfigError;
use tokio::sync::oneshot;
use tracing::{info, warn};

const RELOAD_THREAD_NAME: &str = "stratum-config-reload";

/// Manages live config reloading for one handle.
///
/// The background thread holds only a weak reference to the published
/// snapshot and runs until the [`ReloadGuard`] returned by
/// [`start`](Self::start) is dropped.
pub struct ReloadManager {
    loader: ConfigLoader,
    watcher: ConfigWatcher,
}

/// Keeps a reload thread running; dropping the last clone stops it.
#[derive(Debug, Clone)]
pub struct ReloadGuard {
    _stop: Arc<oneshot::Sender<()>>,
}

impl ReloadManager {
    pub fn new(loader: ConfigLoader) -> Result<Self, ConfigError> {
        let watcher = ConfigWatcher::new(
            loader.directory().to_path_buf(),
            loader.source_file_names(),
        )?;
        Ok(Self { loader, watcher })
    }

    /// Register the watch and spawn the reload thread.
    ///
    /// Watch registration errors are returned here; reload failures later on
    /// are logged and leave the previous snapshot in place.
    pub fn start(self, target: Weak<ArcSwap<MergedConfig>>) -> Result<ReloadGuard, ConfigError> {
        let stream = self.watcher.start()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ConfigError::WatchError(format!("failed to build reload runtime: {e}")))?;

        let (stop_tx, stop_rx) = oneshot::channel();
        let loader = self.loader;
        let _reload_thread = std::thread::Builder::new()
            .name(RELOAD_THREAD_NAME.into())
            .spawn(move || runtime.block_on(run_reload_loop(loader, stream, target, stop_rx)))
            .map_err(|e| ConfigError::WatchError(format!("failed to spawn reload thread: {e}")))?;

        Ok(ReloadGuard {
            _stop: Arc::new(stop_tx),
        })
    }
}

/// Reload on every debounced change until `stop` resolves or its sender is dropped.
pub(crate) async fn run_reload_loop(
    loader: ConfigLoader,
    mut stream: WatchStream,
    target: Weak<ArcSwap<MergedConfig>>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut stop => {
                info!("config handle dropped, stopping reload manager");
                break;
            }
            changed = stream.next_change() => {
                let Some(changed) = changed else {
                    info!("config watcher closed");
                    break;
                };
                let Some(slot) = target.upgrade() else {
                    info!("config handle dropped, stopping reload manager");
                    break;
                };
                reload_into(&loader, &slot, &changed);
            }
        }
    }
}

/// Recompute the merge and publish it into `slot`.
///
/// Returns whether a new snapshot was published.
pub(crate) fn reload_into(
    loader: &ConfigLoader,
    slot: &ArcSwap<MergedConfig>,
    changed: &Path,
) -> bool {
    info!("reloading config after change to {}", changed.display());
    match loader.load() {
        Ok(config) => {
            slot.store(Arc::new(config));
            println!("{}", reload_notice(changed));
            true
        }
        Err(e) => {
            warn!("config reload failed, keeping previous config: {e}");
            false
        }
    }
}

/// Line written to stdout after a successful reload.
pub(crate) fn reload_notice(changed: &Path) -> String {
    let name = changed
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| changed.display().to_string());
    format!("config file changed: {name}")
}
