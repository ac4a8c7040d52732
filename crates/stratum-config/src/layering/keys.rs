//! Dot-path traversal over TOML tables.
//!
//! Keys are case-insensitive: every path is folded to lowercase when it is
//! collected, looked up, or set.

use toml::{Table, Value};

/// Every leaf key of `table` paired with its value.
pub fn leaf_entries(table: &Table) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    collect_leaves("", table, &mut out);
    out
}

/// Every leaf key of `table`, in table order.
pub fn leaf_keys(table: &Table) -> Vec<String> {
    leaf_entries(table).into_iter().map(|(key, _)| key).collect()
}

fn collect_leaves<'a>(prefix: &str, table: &'a Table, out: &mut Vec<(String, &'a Value)>) {
    for (name, value) in table {
        let name = name.to_lowercase();
        let key = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            Value::Table(child) => collect_leaves(&key, child, out),
            leaf => out.push((key, leaf)),
        }
    }
}

/// Rebuild `table` with every key, at every depth, folded to lowercase.
///
/// When two keys differ only in case, the later one in table order wins.
pub fn lowercase_keys(table: Table) -> Table {
    let mut folded = Table::new();
    for (name, value) in table {
        let value = match value {
            Value::Table(child) => Value::Table(lowercase_keys(child)),
            other => other,
        };
        folded.insert(name.to_lowercase(), value);
    }
    folded
}

/// Look up a dot-delimited key.
pub fn get_path<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let key = key.to_lowercase();
    let mut segments = key.split('.');
    let mut current = table.get(segments.next()?)?;
    for segment in segments {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

/// Set a dot-delimited key, creating intermediate tables as needed.
///
/// A non-table value sitting on an intermediate segment is replaced by a table.
pub fn set_path(table: &mut Table, key: &str, value: Value) {
    let key = key.to_lowercase();
    let segments: Vec<&str> = key.split('.').collect();
    set_segments(table, &segments, value);
}

fn set_segments(table: &mut Table, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            table.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = table
                .entry((*head).to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            if let Value::Table(child) = entry {
                set_segments(child, rest, value);
            }
        }
    }
}
