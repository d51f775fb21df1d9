//! SIGHUP triggers an immediate reload.
//!
//! Kept in its own test binary: the signal is delivered to the whole process.

#![cfg(unix)]

use std::time::Duration;

mod common;

#[tokio::test]
async fn test_sighup_reloads_mid_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vanity.yaml");
    std::fs::write(&path, "/old:\n  repo: https://github.com/org/old\n").unwrap();

    let app = common::start_app(common::test_config(path.to_str().unwrap())).await;
    // The handler is installed before the initial load completes.
    assert!(common::wait_until(|| app.store.lookup("/old").is_some(), Duration::from_secs(5)).await);

    std::fs::write(&path, "/new:\n  repo: https://github.com/org/new\n").unwrap();
    let status = std::process::Command::new("kill")
        .args(["-HUP", &std::process::id().to_string()])
        .status()
        .expect("failed to run kill");
    assert!(status.success());

    assert!(
        common::wait_until(|| app.store.lookup("/new").is_some(), Duration::from_secs(5)).await,
        "SIGHUP did not reload the mapping"
    );
    assert!(app.store.lookup("/old").is_none());

    app.shutdown.trigger();
}
