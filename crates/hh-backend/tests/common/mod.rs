//! Shared fixtures for the backend integration suites.
#![allow(dead_code)]

use hh_backend::BackendService;
use hh_store_json::MemoryStore;
use std::sync::Arc;
use std::time::Duration;

/// A fresh service over an in-memory store, with latency disabled.
pub async fn fresh_backend() -> BackendService {
    let (_, backend) = shared_backend().await;
    backend
}

/// Same, but also hands back the store so a test can reconnect a second
/// service instance against the same blob.
pub async fn shared_backend() -> (Arc<MemoryStore>, BackendService) {
    let store = Arc::new(MemoryStore::new());
    let backend = BackendService::connect(Box::new(store.clone()))
        .await
        .expect("connect against empty memory store")
        .with_latency(Duration::ZERO);
    (store, backend)
}

/// Reconnects a second service against an existing store, simulating a
/// full reload of the application.
pub async fn reconnect(store: &Arc<MemoryStore>) -> BackendService {
    BackendService::connect(Box::new(store.clone()))
        .await
        .expect("reconnect against populated store")
        .with_latency(Duration::ZERO)
}
