//! Domain layer: models, validation, aggregation and the services that
//! implement the expense-tracking behavior over the storage layer.

pub mod cleanup_service;
pub mod commands;
pub mod errors;
pub mod expense_service;
pub mod models;
pub mod theme_service;
pub mod totals;
pub mod validation;

pub use cleanup_service::{CleanupResult, CleanupService};
pub use errors::ExpenseError;
pub use expense_service::ExpenseService;
pub use theme_service::{ColorScheme, ThemeMode, ThemeService};
