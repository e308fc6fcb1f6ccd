//! Expense CRUD over the current month's bucket.
//!
//! Every mutating operation is one full bucket load plus one full bucket
//! write; a month of personal expenses is small enough that delta writes
//! would buy nothing. Update and delete search only the current month's
//! bucket, matching the persisted schema's reachability rules.

use chrono::{Datelike, Local, Utc};
use log::info;
use std::sync::Arc;

use crate::domain::commands::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::errors::ExpenseError;
use crate::domain::models::expense::{Expense, MonthlyBucket};
use crate::domain::totals::recalculate_totals;
use crate::domain::validation::{parse_date, validate_amount};
use crate::storage::buckets::{today_string, BucketRepository};
use crate::storage::traits::KeyValueStore;

pub struct ExpenseService {
    repository: BucketRepository,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: BucketRepository::new(store),
        }
    }

    /// Validate and persist a new expense in the current month's bucket.
    ///
    /// The service assigns the id, the creation timestamp and the synced
    /// flag; callers only supply date, amount and category. Returns the
    /// record as persisted.
    pub async fn create_expense(
        &self,
        command: CreateExpenseCommand,
    ) -> Result<Expense, ExpenseError> {
        validate_amount(command.amount)?;
        self.validate_current_month_date(&command.date)?;

        let timestamp = Utc::now().timestamp_millis() as u64;
        let expense = Expense {
            id: Expense::generate_id(timestamp),
            date: command.date,
            amount: command.amount,
            category: command.category,
            timestamp,
            synced: false,
        };

        let mut bucket = self.repository.load_current_bucket().await;
        bucket.records.push(expense.clone());
        bucket.totals = recalculate_totals(&bucket.records, &today_string());
        self.repository.save_current_bucket(&bucket).await?;

        info!("Created expense {} ({})", expense.id, expense.amount);
        Ok(expense)
    }

    /// Merge the given fields into an existing expense and persist the
    /// bucket. Fails with [`ExpenseError::NotFound`] when the id is not in
    /// the current month's bucket.
    pub async fn update_expense(
        &self,
        id: &str,
        command: UpdateExpenseCommand,
    ) -> Result<(), ExpenseError> {
        if let Some(amount) = command.amount {
            validate_amount(amount)?;
        }
        if let Some(date) = &command.date {
            self.validate_current_month_date(date)?;
        }

        let mut bucket = self.repository.load_current_bucket().await;
        let record = bucket
            .records
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ExpenseError::NotFound)?;

        if let Some(date) = command.date {
            record.date = date;
        }
        if let Some(amount) = command.amount {
            record.amount = amount;
        }
        if let Some(category) = command.category {
            record.category = category;
        }
        if let Some(synced) = command.synced {
            record.synced = synced;
        }

        bucket.totals = recalculate_totals(&bucket.records, &today_string());
        self.repository.save_current_bucket(&bucket).await?;

        info!("Updated expense {}", id);
        Ok(())
    }

    /// Remove an expense from the current month's bucket and persist.
    /// Fails with [`ExpenseError::NotFound`] when the id is absent.
    pub async fn delete_expense(&self, id: &str) -> Result<(), ExpenseError> {
        let mut bucket = self.repository.load_current_bucket().await;
        let index = bucket
            .records
            .iter()
            .position(|e| e.id == id)
            .ok_or(ExpenseError::NotFound)?;
        bucket.records.remove(index);

        bucket.totals = recalculate_totals(&bucket.records, &today_string());
        self.repository.save_current_bucket(&bucket).await?;

        info!("Deleted expense {}", id);
        Ok(())
    }

    /// Today's expenses, oldest first by creation timestamp. The ordering is
    /// a presentation contract for the daily list view.
    pub async fn list_today_expenses(&self) -> Vec<Expense> {
        let bucket = self.repository.load_current_bucket().await;
        let today = today_string();

        let mut todays: Vec<Expense> = bucket
            .records
            .into_iter()
            .filter(|e| e.date == today)
            .collect();
        todays.sort_by_key(|e| e.timestamp);
        todays
    }

    /// The current month's bucket, records and totals. Never fails; an
    /// unreadable bucket comes back empty.
    pub async fn current_bucket(&self) -> MonthlyBucket {
        self.repository.load_current_bucket().await
    }

    /// A created or edited expense must live in the bucket it is written to,
    /// so its date has to fall in the current local month.
    fn validate_current_month_date(&self, date: &str) -> Result<(), ExpenseError> {
        let parsed = parse_date(date)?;
        let now = Local::now().date_naive();
        if parsed.year() != now.year() || parsed.month() != now.month() {
            return Err(ExpenseError::InvalidInput(format!(
                "Date {} is outside the current month",
                date
            )));
        }
        Ok(())
    }
}
