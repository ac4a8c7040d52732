//! Layered TOML configuration.
//!
//! A config directory holds up to three sources:
//!
//! - `default.toml`, required;
//! - `<file_name>.toml`, optional, merged over the default key by key;
//! - `custom_env.toml`, optional, whose values name environment variables
//!   that override the merged value at the same key.
//!
//! The merged result is published through a [`ConfigHandle`], optionally
//! refreshed whenever a source file changes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde::Deserialize;
//! use stratum_config::{ConfigHandle, LoaderOptions};
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     port: u16,
//! }
//!
//! let handle = ConfigHandle::load(&LoaderOptions::new().with_file_name("prod"))
//!     .expect("failed to load config");
//! let settings: Settings = handle.decode().expect("config does not fit Settings");
//! println!("listening on {}", settings.port);
//! ```

pub mod decode;
pub mod global;
pub mod handle;
pub mod layering;
pub mod options;
pub mod pipeline;
pub mod reload;
pub mod snapshot;
pub mod toml_loader;
pub mod watcher;

// Re-export core types for convenience
pub use handle::ConfigHandle;
pub use options::{LoaderOptions, ResolvedOptions};
pub use pipeline::{load, ConfigLoader};
pub use reload::{ReloadGuard, ReloadManager};
pub use snapshot::MergedConfig;
pub use stratum_common::{ConfigError, Result};
pub use watcher::ConfigWatcher;
