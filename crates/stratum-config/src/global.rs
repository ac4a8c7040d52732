//! Process-wide configuration, loaded once on first access.
//!
//! Prefer constructing a [`ConfigHandle`] at startup and passing it to the
//! code that needs it. These accessors exist for call sites that cannot be
//! threaded a handle; the first successful call fixes the configuration for
//! the life of the process and the options of later calls are ignored.

use crate::handle::ConfigHandle;
use crate::options::LoaderOptions;
use serde::de::DeserializeOwned;
use std::sync::{Mutex, OnceLock, PoisonError};
use stratum_common::ConfigError;
use tracing::debug;

static GLOBAL: OnceLock<ConfigHandle> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Return the process-wide handle, loading it on first use.
///
/// `None` behaves like [`LoaderOptions::default`]. Concurrent first calls
/// are serialized so the pipeline runs once.
pub fn try_load(options: Option<&LoaderOptions>) -> Result<ConfigHandle, ConfigError> {
    if let Some(handle) = GLOBAL.get() {
        return Ok(handle.clone());
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(handle) = GLOBAL.get() {
        return Ok(handle.clone());
    }

    let defaults = LoaderOptions::default();
    let handle = ConfigHandle::load(options.unwrap_or(&defaults))?;
    debug!("process-wide config initialized");
    Ok(GLOBAL.get_or_init(|| handle).clone())
}

/// Like [`try_load`], but a failure to load is fatal.
///
/// # Panics
///
/// Panics when `default.toml` is missing or unparsable, when the working
/// directory cannot be resolved, or when hot reload cannot be started.
pub fn load(options: Option<&LoaderOptions>) -> ConfigHandle {
    match try_load(options) {
        Ok(handle) => handle,
        Err(e) => panic!("failed to load configuration: {e}"),
    }
}

/// Decode the process-wide configuration into `T`.
///
/// Loading follows [`load`]; decode errors are returned.
pub fn load_to<T: DeserializeOwned>(options: Option<&LoaderOptions>) -> Result<T, ConfigError> {
    load(options).decode()
}

/// The process-wide handle, if it has been initialized.
pub fn get() -> Option<ConfigHandle> {
    GLOBAL.get().cloned()
}
