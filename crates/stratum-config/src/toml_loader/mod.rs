//! Reading individual TOML sources from the config directory.

mod loader;
mod paths;


pub use loader::{load_optional, load_required};
pub use paths::{source_file_name, source_path};
