//! Key-path addressing and the precedence rules applied between sources.
//!
//! Sources are addressed by dot-delimited leaf keys (`server.port`). Arrays
//! and scalars are leaves; empty tables contribute no keys. Keys are
//! compared case-insensitively and stored in lowercase.

mod keys;
mod merge;


pub use keys::{get_path, leaf_entries, leaf_keys, lowercase_keys, set_path};
pub use merge::{merge_over, override_from_env, override_with};
