//! Shared helpers for storage-dependent tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::memory::MemoryStore;
use super::traits::KeyValueStore;

/// A store that fails selected operations and delegates the rest to an
/// in-memory store. Used to exercise the error paths of the services.
pub struct FailingStore {
    inner: MemoryStore,
    fail_set: bool,
    fail_list: bool,
    fail_remove: bool,
}

impl FailingStore {
    pub fn failing_writes() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_set: true,
            fail_list: false,
            fail_remove: false,
        }
    }

    pub fn failing_list_keys() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_set: false,
            fail_list: true,
            fail_remove: false,
        }
    }

    pub fn failing_removes() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_set: false,
            fail_list: false,
            fail_remove: true,
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_set {
            return Err(anyhow!("Injected write failure for key {}", key));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.fail_remove {
            return Err(anyhow!("Injected remove failure for key {}", key));
        }
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[String]) -> Result<()> {
        if self.fail_remove {
            return Err(anyhow!("Injected remove failure for {} key(s)", keys.len()));
        }
        self.inner.remove_many(keys).await
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        if self.fail_list {
            return Err(anyhow!("Injected list_keys failure"));
        }
        self.inner.list_keys().await
    }
}
