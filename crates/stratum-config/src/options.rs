//! Loader options and their resolution against the process environment.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use stratum_common::ConfigError;

/// Name of the mandatory base source (`default.toml`).
pub const DEFAULT_SOURCE: &str = "default";

/// Name of the optional source mapping config keys to environment variable names.
pub const CUSTOM_ENV_SOURCE: &str = "custom_env";

/// Extension shared by every source file.
pub const SOURCE_EXTENSION: &str = "toml";

/// Directory searched when no directory is given, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "config";

/// Options accepted by [`ConfigHandle::load`](crate::ConfigHandle::load) and the
/// process-wide accessors in [`global`](crate::global).
///
/// Every field is optional: an empty `file_name` selects `"default"`, a missing
/// `directory` selects `<cwd>/config`, and hot reload is off unless requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Environment file to merge over the default source, without extension.
    pub file_name: String,
    /// Directory holding the source files.
    pub directory: Option<PathBuf>,
    /// Recompute the merged config whenever a source file changes.
    pub hot_reload: bool,
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_hot_reload(mut self, hot_reload: bool) -> Self {
        self.hot_reload = hot_reload;
        self
    }

    /// Fill in defaults for any unset field.
    ///
    /// Only fails when the directory must be derived from the working
    /// directory and that cannot be determined.
    pub fn resolve(&self) -> Result<ResolvedOptions, ConfigError> {
        Ok(ResolvedOptions {
            file_name: resolve_file_name(&self.file_name),
            directory: resolve_directory(self.directory.as_deref())?,
            hot_reload: self.hot_reload,
        })
    }
}

/// [`LoaderOptions`] with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub file_name: String,
    pub directory: PathBuf,
    pub hot_reload: bool,
}

pub(crate) fn resolve_file_name(file_name: &str) -> String {
    if file_name.is_empty() {
        DEFAULT_SOURCE.to_string()
    } else {
        file_name.to_string()
    }
}

pub(crate) fn resolve_directory(directory: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match directory {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => {
            let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
            Ok(cwd.join(DEFAULT_DIRECTORY))
        }
    }
}
