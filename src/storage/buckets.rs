//! # Bucket Repository
//!
//! Owns the persisted form of monthly buckets: key derivation, decode with
//! fail-closed substitution of the empty bucket, and full-bucket writes.
//! One bucket per calendar month under `expenses_<YYYY>_<MM>`.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, warn};
use std::sync::Arc;

use crate::domain::errors::ExpenseError;
use crate::domain::models::expense::{MonthlyBucket, BUCKET_SCHEMA_VERSION};
use crate::storage::traits::KeyValueStore;

/// Prefix shared by every bucket key; cleanup selects on it.
pub const BUCKET_KEY_PREFIX: &str = "expenses_";

/// Deterministic bucket key for the month containing `date`, zero-padded:
/// 2024-03-15 maps to "expenses_2024_03".
pub fn monthly_key(date: NaiveDate) -> String {
    format!("{}{}_{:02}", BUCKET_KEY_PREFIX, date.year(), date.month())
}

/// Bucket key for the current local month.
pub fn monthly_key_now() -> String {
    monthly_key(Local::now().date_naive())
}

/// The current local day as "YYYY-MM-DD".
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Repository over the key-value store for monthly buckets. Exclusively owns
/// bucket read-modify-write; services never touch bucket keys directly.
#[derive(Clone)]
pub struct BucketRepository {
    store: Arc<dyn KeyValueStore>,
}

impl BucketRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the bucket for the month containing `date`.
    ///
    /// Absent key, a failed read and malformed JSON all yield the canonical
    /// empty bucket; the persisted value stays untouched and authoritative
    /// until the next successful write. This path never fails the caller.
    pub async fn load_bucket(&self, date: NaiveDate) -> MonthlyBucket {
        let key = monthly_key(date);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return MonthlyBucket::empty(),
            Err(e) => {
                warn!("Failed to read bucket {}: {}", key, e);
                return MonthlyBucket::empty();
            }
        };

        match serde_json::from_str::<MonthlyBucket>(&raw) {
            Ok(bucket) => {
                if bucket.schema_version > BUCKET_SCHEMA_VERSION {
                    warn!(
                        "Bucket {} has schema version {} (newer than {})",
                        key, bucket.schema_version, BUCKET_SCHEMA_VERSION
                    );
                }
                bucket
            }
            Err(e) => {
                warn!("Bucket {} is malformed, treating as empty: {}", key, e);
                MonthlyBucket::empty()
            }
        }
    }

    /// Load the current local month's bucket.
    pub async fn load_current_bucket(&self) -> MonthlyBucket {
        self.load_bucket(Local::now().date_naive()).await
    }

    /// Persist `bucket` as the current local month's value, replacing it
    /// whole. Write failures propagate so the UI can surface them.
    pub async fn save_current_bucket(&self, bucket: &MonthlyBucket) -> Result<(), ExpenseError> {
        let key = monthly_key_now();
        let encoded =
            serde_json::to_string(bucket).map_err(|e| ExpenseError::StorageWrite(e.into()))?;
        self.store
            .set(&key, &encoded)
            .await
            .map_err(ExpenseError::StorageWrite)?;
        debug!("Persisted bucket {} with {} record(s)", key, bucket.records.len());
        Ok(())
    }

    /// All persisted bucket keys, current month included.
    pub async fn list_bucket_keys(&self) -> Result<Vec<String>> {
        let keys = self.store.list_keys().await?;
        Ok(keys
            .into_iter()
            .filter(|key| key.starts_with(BUCKET_KEY_PREFIX))
            .collect())
    }

    /// Bulk-delete the given bucket keys.
    pub async fn remove_buckets(&self, keys: &[String]) -> Result<()> {
        self.store.remove_many(keys).await
    }
}
