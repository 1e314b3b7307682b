//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log_gate::ConfigTree;

/// Parse a JSON object into a category tree.
pub fn tree(json: &str) -> ConfigTree {
    ConfigTree::from_json_str(json).unwrap()
}

/// A config file path unique to this test process.
#[allow(dead_code)]
pub fn temp_config_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("log-gate-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join("gate.toml")
}

/// Poll `f` until it returns true or `timeout` elapses.
#[allow(dead_code)]
pub async fn wait_until<F>(timeout: Duration, mut f: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if f() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    f()
}
