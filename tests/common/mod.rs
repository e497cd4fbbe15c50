//! Shared utilities for integration tests.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use qrshare::{FileServer, ServeConfig, ServeError, ServeHandle};
use tempfile::TempDir;

/// Write `contents` to `name` inside `dir`.
pub fn fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn loopback() -> IpAddr {
    "127.0.0.1".parse().unwrap()
}

/// Start a session on loopback and wait for it to serve.
pub async fn start(file: &Path, keep: bool) -> ServeHandle {
    let mut config = ServeConfig::new(file);
    config.keep = keep;
    start_with(config).await
}

#[allow(dead_code)]
pub async fn start_with(config: ServeConfig) -> ServeHandle {
    let mut handle = FileServer::start(loopback(), &config).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle.started())
        .await
        .expect("session never started");
    handle
}

/// Client without pooling or proxies, so connections don't outlive requests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Wait for the outcome, failing the test if it takes too long.
pub async fn finished(handle: &mut ServeHandle) -> Result<(), ServeError> {
    tokio::time::timeout(Duration::from_secs(5), handle.finished())
        .await
        .expect("session never finished")
}

/// Assert the session is still running after a short pause.
#[allow(dead_code)]
pub async fn assert_still_serving(handle: &mut ServeHandle) {
    let outcome = tokio::time::timeout(Duration::from_millis(300), handle.finished()).await;
    assert!(outcome.is_err(), "session finished unexpectedly: {outcome:?}");
    assert_eq!(handle.state(), qrshare::SessionState::Serving);
}
