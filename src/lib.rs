//! # Expense Tracker Core
//!
//! Data core for a personal expense-logging app: records live in one
//! persisted bucket per calendar month with always-recomputed totals, and a
//! rollover check purges every past month's bucket on launch. Storage is an
//! async string-keyed key-value store with file-backed and in-memory
//! implementations.
//!
//! The UI constructs one [`Backend`] at startup and calls its services for
//! everything; no ambient global state.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use domain::commands::{CreateExpenseCommand, UpdateExpenseCommand};
pub use domain::models::expense::{Category, CategoryTotals, Expense, MonthlyBucket, Totals};
pub use domain::{CleanupResult, CleanupService, ColorScheme, ExpenseError, ExpenseService,
    ThemeMode, ThemeService};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Main backend struct that orchestrates all services over one shared
/// store. Created once at app start; lives for the process lifetime.
pub struct Backend {
    pub expense_service: ExpenseService,
    pub cleanup_service: CleanupService,
    pub theme_service: ThemeService,
}

impl Backend {
    /// Wire the services over an existing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            expense_service: ExpenseService::new(store.clone()),
            cleanup_service: CleanupService::new(store.clone()),
            theme_service: ThemeService::new(store),
        }
    }

    /// Convenience constructor over a file store rooted at `data_directory`.
    pub fn with_data_directory<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let store = Arc::new(FileStore::new(data_directory)?);
        Ok(Self::new(store))
    }
}
