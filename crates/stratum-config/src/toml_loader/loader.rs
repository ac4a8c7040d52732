//! Core TOML source loading: required and optional variants.

use stratum_common::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use toml::Table;
use tracing::{debug, info, warn};

/// Load a source that must exist and parse.
///
/// Any failure is reported as [`ConfigError::RequiredSource`] carrying the
/// offending path.
pub fn load_required(path: &Path) -> Result<Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RequiredSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let table: Table = toml::from_str(&content).map_err(|e| ConfigError::RequiredSource {
        path: path.to_path_buf(),
        reason: format!("failed to parse TOML: {e}"),
    })?;

    info!("loaded config source {}", path.display());
    Ok(table)
}

/// Load a source that may be absent.
///
/// A missing, unreadable, or unparsable file yields an empty table.
pub fn load_optional(path: &Path) -> Table {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("optional config source {} not present", path.display());
            return Table::new();
        }
        Err(e) => {
            warn!("ignoring unreadable config source {}: {e}", path.display());
            return Table::new();
        }
    };

    match toml::from_str::<Table>(&content) {
        Ok(table) => {
            info!("loaded config source {}", path.display());
            table
        }
        Err(e) => {
            warn!("ignoring unparsable config source {}: {e}", path.display());
            Table::new()
        }
    }
}
