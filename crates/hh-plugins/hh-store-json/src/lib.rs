//! # hh-store-json
//!
//! `StateStore` implementations. The production adapter persists the whole
//! state blob as one JSON document under the versioned state key, standing
//! in for the browser's durable key-value store. `MemoryStore` backs tests
//! and demos.

use async_trait::async_trait;
use hh_core::models::{HubState, STATE_KEY};
use hh_core::traits::StateStore;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;

/// File-backed blob store: `<data_dir>/<STATE_KEY>.json`.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn blob_path(&self) -> PathBuf {
        self.data_dir.join(format!("{STATE_KEY}.json"))
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> anyhow::Result<Option<HubState>> {
        let path = self.blob_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).await?;
        let state = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    /// Overwrites the blob wholesale. Writes to a sibling temp file first so
    /// a crash mid-write cannot truncate the only copy.
    async fn save(&self, state: &HubState) -> anyhow::Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        let raw = serde_json::to_string_pretty(state)?;
        let path = self.blob_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).await?;
        fs::rename(&tmp, &path).await?;
        log::debug!("persisted state blob to {}", path.display());
        Ok(())
    }
}

/// In-memory blob store. Keeps the serialized form, not the structs, so a
/// load always hands back an independent copy — same sharing semantics as
/// the file store.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> anyhow::Result<Option<HubState>> {
        let guard = self.blob.lock().expect("store mutex poisoned");
        match guard.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &HubState) -> anyhow::Result<()> {
        let raw = serde_json::to_string(state)?;
        *self.blob.lock().expect("store mutex poisoned") = Some(raw);
        Ok(())
    }
}
