//! The full load pipeline: default source, environment file, environment variables.

use crate::layering::{merge_over, override_from_env};
use crate::options::{
    resolve_directory, resolve_file_name, ResolvedOptions, CUSTOM_ENV_SOURCE, DEFAULT_SOURCE,
};
use crate::snapshot::MergedConfig;
use crate::toml_loader::{load_optional, load_required, source_file_name, source_path};
use std::path::{Path, PathBuf};
use stratum_common::ConfigError;
use tracing::info;

/// Loads and merges the sources of one config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoader {
    file_name: String,
    directory: PathBuf,
}

impl ConfigLoader {
    pub fn new(file_name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            directory: directory.into(),
        }
    }

    pub fn from_options(options: &ResolvedOptions) -> Self {
        Self::new(options.file_name.clone(), options.directory.clone())
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File names of every source this loader reads.
    pub fn source_file_names(&self) -> Vec<String> {
        let mut names = vec![
            source_file_name(DEFAULT_SOURCE),
            source_file_name(&self.file_name),
            source_file_name(CUSTOM_ENV_SOURCE),
        ];
        names.dedup();
        names
    }

    /// Run the pipeline once and return a fresh snapshot.
    ///
    /// Fails only when `default.toml` is missing or unparsable. The
    /// environment file and `custom_env.toml` are optional.
    pub fn load(&self) -> Result<MergedConfig, ConfigError> {
        let mut merged = load_required(&source_path(&self.directory, DEFAULT_SOURCE))?;
        let env_file = load_optional(&source_path(&self.directory, &self.file_name));
        let overrides = load_optional(&source_path(&self.directory, CUSTOM_ENV_SOURCE));

        merge_over(&mut merged, &env_file);
        override_from_env(&mut merged, &overrides);

        info!(
            "merged config `{}` from {}",
            self.file_name,
            self.directory.display()
        );
        Ok(MergedConfig::new(merged))
    }
}

/// Load `conf_name` from `conf_path`, applying defaults for empty arguments.
///
/// An empty `conf_name` selects `"default"`; an empty `conf_path` selects
/// `<cwd>/config`.
pub fn load(conf_name: &str, conf_path: &Path) -> Result<MergedConfig, ConfigError> {
    let directory = resolve_directory(Some(conf_path))?;
    ConfigLoader::new(resolve_file_name(conf_name), directory).load()
}
