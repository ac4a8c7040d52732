//! Live config reload manager.
//!
//! Combines the directory watcher with the load pipeline to republish the
//! merged config whenever a source file changes on disk.

mod manager;


pub use manager::{ReloadGuard, ReloadManager};
