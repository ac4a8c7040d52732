//! Immutable merged configuration snapshot.

use crate::decode;
use crate::layering::{get_path, leaf_keys, lowercase_keys};
use serde::de::DeserializeOwned;
use stratum_common::ConfigError;
use toml::{Table, Value};

/// The result of merging every source, in precedence order.
///
/// Snapshots are never mutated after construction; a reload produces a new
/// snapshot instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedConfig {
    table: Table,
}

impl MergedConfig {
    /// Wrap `table`, folding its keys to lowercase.
    pub fn new(table: Table) -> Self {
        Self {
            table: lowercase_keys(table),
        }
    }

    /// Value at a dot-delimited key, e.g. `server.port`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        get_path(&self.table, key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All leaf keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = leaf_keys(&self.table);
        keys.sort();
        keys
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String form of a scalar value; numbers and bools are rendered.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.decode_key(key).ok()
    }

    /// Integer at `key`, parsing string values.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.decode_key(key).ok()
    }

    /// Float at `key`, parsing string values.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.decode_key(key).ok()
    }

    /// Bool at `key`, parsing string values such as `"true"` or `"1"`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.decode_key(key).ok()
    }

    /// Decode the whole configuration into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        decode::decode_table(&self.table)
    }

    /// Decode the value (or sub-table) at `key` into `T`.
    pub fn decode_key<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::DecodeError(format!("key `{key}` not present")))?;
        decode::decode_value(value.clone())
    }

    pub fn as_table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.table)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
    }
}

impl From<Table> for MergedConfig {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(src: &str) -> MergedConfig {
        MergedConfig::new(toml::from_str(src).unwrap())
    }

    #[test]
    fn get_by_dot_path() {
        let cfg = config("[server]\nport = 8080");
        assert_eq!(cfg.get("server.port").and_then(Value::as_integer), Some(8080));
        assert!(cfg.contains("server"));
        assert!(!cfg.contains("server.host"));
    }

    #[test]
    fn lookups_ignore_key_case() {
        let cfg = config("[Server]\nPort = 8080");
        assert_eq!(cfg.keys(), vec!["server.port"]);
        assert_eq!(cfg.get_i64("SERVER.port"), Some(8080));
        assert_eq!(cfg.get_i64("server.Port"), Some(8080));
    }

    #[test]
    fn keys_are_sorted_leaves() {
        let cfg = config("z = 1\n[a]\ny = 2\nx = 3");
        assert_eq!(cfg.keys(), vec!["a.x", "a.y", "z"]);
    }

    #[test]
    fn typed_getters_coerce_strings() {
        let cfg = config(
            r#"
port = "8080"
ratio = "0.25"
enabled = "true"
count = 7
"#,
        );
        assert_eq!(cfg.get_i64("port"), Some(8080));
        assert_eq!(cfg.get_f64("ratio"), Some(0.25));
        assert_eq!(cfg.get_bool("enabled"), Some(true));
        assert_eq!(cfg.get_string("count").as_deref(), Some("7"));
        assert_eq!(cfg.get_str("count"), None);
        assert_eq!(cfg.get_str("port"), Some("8080"));
    }

    #[test]
    fn typed_getters_return_none_for_missing_or_mismatched() {
        let cfg = config("name = \"svc\"");
        assert_eq!(cfg.get_i64("missing"), None);
        assert_eq!(cfg.get_i64("name"), None);
    }

    #[test]
    fn decode_key_reports_missing_key() {
        let cfg = config("a = 1");
        let err = cfg.decode_key::<i64>("b").unwrap_err();
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn to_json_renders_nested_values() {
        let cfg = config("name = \"svc\"\n[server]\nport = 1");
        let json = cfg.to_json();
        assert!(json.contains("\"name\": \"svc\""));
        assert!(json.contains("\"port\": 1"));
    }
}
