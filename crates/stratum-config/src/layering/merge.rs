//! Source precedence: environment file over default, then environment variables.

use super::keys::{leaf_entries, lowercase_keys, set_path};
use toml::{Table, Value};
use tracing::debug;

/// Overwrite `base` with every leaf of `overlay`.
///
/// Keys absent from `overlay` keep their value in `base`. Keys of `base` are
/// folded to lowercase first so differently cased spellings collapse.
pub fn merge_over(base: &mut Table, overlay: &Table) {
    *base = lowercase_keys(std::mem::take(base));
    for (key, value) in leaf_entries(overlay) {
        set_path(base, &key, value.clone());
    }
}

/// Apply environment-variable redirections from a `custom_env` source.
///
/// Each leaf of `overrides` names a process environment variable; when that
/// variable is set, its contents replace the value at the same key in
/// `target` as a string.
pub fn override_from_env(target: &mut Table, overrides: &Table) {
    override_with(target, overrides, |name| {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    });
}

/// [`override_from_env`] with a caller-supplied variable lookup.
pub fn override_with<F>(target: &mut Table, overrides: &Table, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    *target = lowercase_keys(std::mem::take(target));
    for (key, var) in leaf_entries(overrides) {
        let name = variable_name(var);
        if !is_valid_variable_name(&name) {
            debug!(key = %key, "skipping unusable environment variable name {name:?}");
            continue;
        }
        if let Some(value) = lookup(&name) {
            debug!(key = %key, var = %name, "config key overridden from environment");
            set_path(target, &key, Value::String(value));
        }
    }
}

fn variable_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}
