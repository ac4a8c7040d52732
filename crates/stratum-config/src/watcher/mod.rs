//! File watcher for live config reload.
//!
//! Uses the `notify` crate to watch the config directory for changes to the
//! source files, with a 500ms debounce to avoid rapid reloads.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, WatchStream, DEBOUNCE};
