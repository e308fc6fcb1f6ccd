//! # Cleanup Service
//!
//! Month-rollover detection and old-bucket purging. Only the current
//! month's bucket is ever retained; everything else under the bucket prefix
//! is deleted once the calendar month changes. A single persisted marker
//! (`lastCleanupDate`) remembers when the check last ran.
//!
//! Cleanup failures never propagate as errors; callers always get a
//! structured [`CleanupResult`] they can show or ignore.

use chrono::{DateTime, Datelike, Local};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::storage::buckets::{monthly_key_now, BUCKET_KEY_PREFIX};
use crate::storage::traits::KeyValueStore;

/// Store key holding the RFC 3339 instant of the last rollover check.
pub const LAST_CLEANUP_KEY: &str = "lastCleanupDate";

/// Outcome of a cleanup run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupResult {
    pub success: bool,
    pub deleted_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CleanupResult {
    fn ok(deleted_count: usize) -> Self {
        Self {
            success: true,
            deleted_count,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            deleted_count: 0,
            error: Some(message),
        }
    }
}

pub struct CleanupService {
    store: Arc<dyn KeyValueStore>,
}

impl CleanupService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether the calendar month (or year) has changed since the last
    /// check.
    ///
    /// On the very first run there is no marker; the current instant is
    /// written as the baseline and the answer is false, so a fresh install
    /// never starts with a purge. When a marker exists it is only read,
    /// never rewritten here.
    pub async fn has_month_changed(&self) -> bool {
        let last_cleanup = match self.last_cleanup_date().await {
            Some(date) => date,
            None => {
                self.save_last_cleanup_date(Local::now()).await;
                return false;
            }
        };

        let now = Local::now();
        last_cleanup.year() != now.year() || last_cleanup.month() != now.month()
    }

    /// Delete every persisted bucket except the current month's, then move
    /// the marker to now. All failures fold into the result.
    pub async fn cleanup_old_data(&self) -> CleanupResult {
        let current_key = monthly_key_now();

        let keys = match self.store.list_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                error!("Cleanup failed listing keys: {}", e);
                return CleanupResult::failed(e.to_string());
            }
        };

        let stale_keys: Vec<String> = keys
            .into_iter()
            .filter(|key| key.starts_with(BUCKET_KEY_PREFIX) && *key != current_key)
            .collect();
        let deleted_count = stale_keys.len();

        if deleted_count > 0 {
            if let Err(e) = self.store.remove_many(&stale_keys).await {
                error!("Cleanup failed removing old buckets: {}", e);
                return CleanupResult::failed(e.to_string());
            }
            info!("Cleaned up {} old month(s) of data", deleted_count);
        }

        self.save_last_cleanup_date(Local::now()).await;

        CleanupResult::ok(deleted_count)
    }

    /// Run the rollover check once per app launch: purge only when the
    /// month actually changed, otherwise report nothing happened.
    pub async fn perform_auto_cleanup(&self) -> Option<CleanupResult> {
        if self.has_month_changed().await {
            info!("Month changed, performing auto cleanup");
            return Some(self.cleanup_old_data().await);
        }
        None
    }

    /// Manual trigger: purge unconditionally, bypassing the month check.
    pub async fn force_cleanup(&self) -> CleanupResult {
        info!("Force cleanup initiated");
        self.cleanup_old_data().await
    }

    /// Drop the marker so the next check re-establishes the baseline. Per
    /// the first-run rule, the check right after a reset re-arms without
    /// cleaning.
    pub async fn reset_cleanup_history(&self) {
        match self.store.remove(LAST_CLEANUP_KEY).await {
            Ok(()) => info!("Cleanup history reset"),
            Err(e) => error!("Failed to reset cleanup history: {}", e),
        }
    }

    /// Read and parse the marker. Read failures and unparseable values both
    /// come back as None, which the caller treats like a first run.
    async fn last_cleanup_date(&self) -> Option<DateTime<Local>> {
        let raw = match self.store.get(LAST_CLEANUP_KEY).await {
            Ok(value) => value?,
            Err(e) => {
                error!("Failed to get last cleanup date: {}", e);
                return None;
            }
        };

        match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Local)),
            Err(e) => {
                warn!("Unparseable cleanup marker {:?}: {}", raw, e);
                None
            }
        }
    }

    /// Persist the marker. Failures are logged and swallowed; the next
    /// launch simply checks again.
    async fn save_last_cleanup_date(&self, date: DateTime<Local>) {
        if let Err(e) = self.store.set(LAST_CLEANUP_KEY, &date.to_rfc3339()).await {
            error!("Failed to save cleanup date: {}", e);
        }
    }
}
