//! # Storage Traits
//!
//! This module defines the key-value storage abstraction that allows
//! different storage backends to be used interchangeably by the domain
//! layer.

use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for the durable key-value store.
///
/// This abstracts away the specific storage implementation details, allowing
/// the domain layer to work with different backends (flat files on device,
/// in-memory for tests) without modification. Keys and values are plain
/// strings; structured values are serialized by the caller.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every entry in `keys`. Absent keys are skipped silently.
    async fn remove_many(&self, keys: &[String]) -> Result<()>;

    /// List all keys currently present in the store, in no particular order.
    async fn list_keys(&self) -> Result<Vec<String>>;
}
