//! Environment-variable overrides through the full load pipeline.
//!
//! Every test here mutates or reads the process environment, so all of them
//! run serially.

use serde::Deserialize;
use serial_test::serial;
use std::path::Path;
use stratum_config::{ConfigHandle, ConfigLoader, LoaderOptions};
use toml::Value;

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
#[serial]
fn set_variable_overrides_and_unset_variable_keeps_value() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "default.toml", "a = 1\nb = 2");
    write(dir.path(), "prod.toml", "b = 3");
    write(
        dir.path(),
        "custom_env.toml",
        "a = \"STRATUM_ENV_TEST_A\"\nb = \"STRATUM_ENV_TEST_UNSET\"",
    );
    std::env::set_var("STRATUM_ENV_TEST_A", "99");
    std::env::remove_var("STRATUM_ENV_TEST_UNSET");

    let cfg = ConfigLoader::new("prod", dir.path()).load().unwrap();
    assert_eq!(cfg.get_str("a"), Some("99"));
    assert_eq!(cfg.get_i64("a"), Some(99));
    assert_eq!(cfg.get("b"), Some(&Value::Integer(3)));
}

#[test]
#[serial]
fn mixed_case_keys_collapse_across_sources() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "default.toml", "Port = 1\n[DB]\nHost = \"local\"");
    write(dir.path(), "prod.toml", "port = 2");
    write(dir.path(), "custom_env.toml", "db.host = \"STRATUM_ENV_TEST_DB_HOST\"");
    std::env::set_var("STRATUM_ENV_TEST_DB_HOST", "db.internal");

    let cfg = stratum_config::load("prod", dir.path()).unwrap();
    assert_eq!(cfg.keys(), vec!["db.host", "port"]);
    assert_eq!(cfg.get_i64("port"), Some(2));
    assert_eq!(cfg.get_str("db.host"), Some("db.internal"));
}

#[test]
#[serial]
fn empty_variable_decodes_as_zero() {
    #[derive(Debug, Deserialize)]
    struct Server {
        port: u16,
    }

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "default.toml", "port = 8080");
    write(dir.path(), "custom_env.toml", "port = \"STRATUM_ENV_TEST_EMPTY_PORT\"");
    std::env::set_var("STRATUM_ENV_TEST_EMPTY_PORT", "");

    let handle = ConfigHandle::load(&LoaderOptions::new().with_directory(dir.path())).unwrap();
    assert_eq!(handle.snapshot().get_str("port"), Some(""));
    assert_eq!(handle.decode::<Server>().unwrap().port, 0);
}
