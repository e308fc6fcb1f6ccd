//! Persisted theme preference (`app_theme_mode`).
//!
//! Sits next to the expense data in the same store but is otherwise
//! independent of it. Auto defers to whatever scheme the host platform
//! reports.

use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::errors::ExpenseError;
use crate::storage::traits::KeyValueStore;

/// Store key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "app_theme_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

/// A concrete scheme after Auto has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ThemeMode {
    fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ThemeMode::Auto),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// The scheme actually applied: Auto follows the system scheme, and an
    /// unknown system scheme falls back to light.
    pub fn resolve(self, system: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemeMode::Auto => system.unwrap_or(ColorScheme::Light),
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
        }
    }
}

pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved preference, or Auto when nothing (or something unusable)
    /// is stored. Read trouble never fails the caller.
    pub async fn get_theme_mode(&self) -> ThemeMode {
        let raw = match self.store.get(THEME_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ThemeMode::Auto,
            Err(e) => {
                warn!("Failed to load theme mode: {}", e);
                return ThemeMode::Auto;
            }
        };

        ThemeMode::from_str(&raw).unwrap_or_else(|| {
            warn!("Ignoring unknown theme mode value {:?}", raw);
            ThemeMode::Auto
        })
    }

    /// Persist a new preference.
    pub async fn set_theme_mode(&self, mode: ThemeMode) -> Result<(), ExpenseError> {
        self.store
            .set(THEME_STORAGE_KEY, mode.as_str())
            .await
            .map_err(ExpenseError::StorageWrite)
    }
}
