//! Domain error taxonomy.
//!
//! Read failures on buckets are swallowed into the canonical empty bucket by
//! the repository, so callers of the expense service only ever see the write,
//! not-found and validation variants. Cleanup reports its failures through
//! `CleanupResult` instead of this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Update or delete referenced an id that is not in the current month's
    /// bucket. The message is a UI contract; tests assert on it.
    #[error("Expense not found")]
    NotFound,

    /// The underlying store failed to persist a bucket or setting. Surfaced
    /// to the caller so the UI can show the failure; not retried.
    #[error("Storage write failed: {0}")]
    StorageWrite(anyhow::Error),

    /// The underlying store failed on an explicit read path.
    #[error("Storage read failed: {0}")]
    StorageRead(anyhow::Error),

    /// Input rejected at the creation/update boundary.
    #[error("{0}")]
    InvalidInput(String),
}

impl ExpenseError {
    /// True for errors that mean "the id was wrong", as opposed to storage
    /// trouble. Lets callers branch without matching every variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExpenseError::NotFound)
    }
}
