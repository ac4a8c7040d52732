//! Decoding merged config into caller-defined types.
//!
//! Environment overrides always arrive as strings, so decoding is weakly
//! typed: `"8080"` fills a `u16`, `"true"` fills a `bool`, and numbers fill
//! `String` fields. Shapes that cannot be reconciled produce
//! [`ConfigError::DecodeError`].

mod weak;


use serde::de::DeserializeOwned;
use stratum_common::ConfigError;
use toml::{Table, Value};

pub use weak::WeakValue;

/// Decode a whole table into `T`.
pub fn decode_table<T: DeserializeOwned>(table: &Table) -> Result<T, ConfigError> {
    decode_value(Value::Table(table.clone()))
}

/// Decode a single value into `T`.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, ConfigError> {
    T::deserialize(WeakValue::new(value))
}
