//! # Core Traits (Ports)
//!
//! Any state-store plugin must implement these traits to be used by the
//! backend service.

use crate::models::HubState;
use async_trait::async_trait;

/// Persistence contract for the whole state blob.
///
/// The store is a key-value blob store: the entire [`HubState`] is written
/// wholesale on every save, and `load` returns `None` when nothing has been
/// persisted yet (first run).
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<HubState>>;
    async fn save(&self, state: &HubState) -> anyhow::Result<()>;
}

// A shared handle to a store is itself a store. Lets several service
// instances (or a test and a service) point at the same blob.
#[async_trait]
impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    async fn load(&self) -> anyhow::Result<Option<HubState>> {
        (**self).load().await
    }

    async fn save(&self, state: &HubState) -> anyhow::Result<()> {
        (**self).save(state).await
    }
}
