//! Shared, atomically swappable configuration handle.

use crate::options::LoaderOptions;
use crate::pipeline::ConfigLoader;
use crate::reload::{ReloadGuard, ReloadManager};
use crate::snapshot::MergedConfig;
use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use stratum_common::ConfigError;
use tracing::info;

/// Handle to the current merged configuration.
///
/// Cloning is cheap and every clone observes the same snapshot. Reads are
/// lock-free; a reload publishes a whole new snapshot with a single atomic
/// store, so readers see either the previous or the next config in full.
#[derive(Clone)]
pub struct ConfigHandle {
    current: Arc<ArcSwap<MergedConfig>>,
    loader: ConfigLoader,
    reload: Option<ReloadGuard>,
}

impl ConfigHandle {
    /// Resolve `options`, run the load pipeline, and start hot reload if requested.
    ///
    /// The reload thread and its watch stop once every clone of the handle
    /// has been dropped.
    pub fn load(options: &LoaderOptions) -> Result<Self, ConfigError> {
        let resolved = options.resolve()?;
        let loader = ConfigLoader::from_options(&resolved);
        let mut handle = Self::from_loader(loader)?;

        if resolved.hot_reload {
            let guard = ReloadManager::new(handle.loader.clone())?
                .start(Arc::downgrade(&handle.current))?;
            handle.reload = Some(guard);
            info!("hot reload enabled for {}", resolved.directory.display());
        }

        Ok(handle)
    }

    /// Load once with `loader`, without watching for changes.
    pub fn from_loader(loader: ConfigLoader) -> Result<Self, ConfigError> {
        let config = loader.load()?;
        Ok(Self {
            current: Arc::new(ArcSwap::from_pointee(config)),
            loader,
            reload: None,
        })
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<MergedConfig> {
        self.current.load_full()
    }

    /// Decode the current snapshot into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.current.load().decode()
    }

    /// Rerun the pipeline now and publish the result.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = self.loader.load()?;
        self.current.store(Arc::new(config));
        Ok(())
    }

    pub fn loader(&self) -> &ConfigLoader {
        &self.loader
    }

    /// Whether two handles share the same underlying snapshot slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

impl std::fmt::Debug for ConfigHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.load();
        f.debug_struct("ConfigHandle")
            .field("loader", &self.loader)
            .field("hot_reload", &self.reload.is_some())
            .field("current", &**current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Settings {
        a: i64,
        b: i64,
    }

    #[test]
    fn load_merges_environment_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "a = 1\nb = 2");
        write(dir.path(), "prod.toml", "b = 3");

        let handle = ConfigHandle::load(
            &LoaderOptions::new()
                .with_file_name("prod")
                .with_directory(dir.path()),
        )
        .unwrap();

        let settings: Settings = handle.decode().unwrap();
        assert_eq!(settings, Settings { a: 1, b: 3 });
    }

    #[test]
    fn decode_shape_mismatch_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "a = \"one\"\nb = 2");

        let handle = ConfigHandle::load(&LoaderOptions::new().with_directory(dir.path())).unwrap();
        let err = handle.decode::<Settings>().unwrap_err();
        assert!(matches!(err, ConfigError::DecodeError(_)));
    }

    #[test]
    fn load_without_default_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigHandle::load(&LoaderOptions::new().with_directory(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::RequiredSource { .. }));
    }

    #[test]
    fn clones_share_snapshot_and_reload_replaces_it() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "a = 1\nb = 2");

        let handle = ConfigHandle::load(&LoaderOptions::new().with_directory(dir.path())).unwrap();
        let clone = handle.clone();
        assert!(handle.ptr_eq(&clone));

        let before = handle.snapshot();
        write(dir.path(), "default.toml", "a = 10\nb = 20");
        handle.reload().unwrap();

        assert_eq!(before.get_i64("a"), Some(1));
        assert_eq!(clone.snapshot().get_i64("a"), Some(10));
    }

    #[test]
    fn failed_reload_keeps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "a = 1\nb = 2");

        let handle = ConfigHandle::load(&LoaderOptions::new().with_directory(dir.path())).unwrap();
        std::fs::remove_file(dir.path().join("default.toml")).unwrap();

        assert!(handle.reload().is_err());
        assert_eq!(handle.snapshot().get_i64("b"), Some(2));
    }

    #[test]
    fn hot_reload_picks_up_environment_file_change() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "a = 1\nb = 2");
        write(dir.path(), "prod.toml", "b = 3");

        let handle = ConfigHandle::load(
            &LoaderOptions::new()
                .with_file_name("prod")
                .with_directory(dir.path())
                .with_hot_reload(true),
        )
        .unwrap();
        assert_eq!(handle.snapshot().get_i64("b"), Some(3));

        write(dir.path(), "prod.toml", "b = 4");

        let deadline = Instant::now() + Duration::from_secs(10);
        while handle.snapshot().get_i64("b") != Some(4) {
            assert!(Instant::now() < deadline, "hot reload did not publish new config");
            std::thread::sleep(Duration::from_millis(50));
        }
        assert_eq!(handle.snapshot().get_i64("a"), Some(1));
    }

    #[test]
    fn from_loader_on_missing_directory_fails() {
        let err = ConfigHandle::from_loader(ConfigLoader::new(
            "default",
            "/tmp/nonexistent_stratum_handle_dir",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::RequiredSource { .. }));
    }
}
