//! Command structs consumed by the domain services.

use serde::{Deserialize, Serialize};

use crate::domain::models::expense::Category;

/// Input for creating an expense. The id, creation timestamp and synced flag
/// are assigned by the service, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseCommand {
    /// Calendar day of the expense, "YYYY-MM-DD"; must fall in the current
    /// month.
    pub date: String,
    /// Amount in whole currency units, 1..=1_000_000.
    pub amount: u32,
    pub category: Category,
}

/// Partial update for an existing expense. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseCommand {
    pub date: Option<String>,
    pub amount: Option<u32>,
    pub category: Option<Category>,
    pub synced: Option<bool>,
}
