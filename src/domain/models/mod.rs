pub mod expense;

pub use expense::{Category, CategoryTotals, Expense, MonthlyBucket, Totals};
