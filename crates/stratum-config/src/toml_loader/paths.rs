//! Source file naming.

use crate::options::SOURCE_EXTENSION;
use std::path::{Path, PathBuf};

/// File name of a source, e.g. `prod` -> `prod.toml`.
pub fn source_file_name(name: &str) -> String {
    format!("{name}.{SOURCE_EXTENSION}")
}

/// Full path of a named source inside `dir`.
pub fn source_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(source_file_name(name))
}
