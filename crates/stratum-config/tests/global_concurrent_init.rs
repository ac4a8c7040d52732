//! Concurrent first access to the process-wide accessor loads once.

use stratum_config::{global, LoaderOptions};

#[test]
fn concurrent_first_access_initializes_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("default.toml"), "name = \"x\"\nport = 1").unwrap();
    let options = LoaderOptions::new().with_directory(dir.path());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let options = options.clone();
            std::thread::spawn(move || global::load(Some(&options)))
        })
        .collect();
    let loaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for handle in &loaded {
        assert!(handle.ptr_eq(&loaded[0]));
    }
}
