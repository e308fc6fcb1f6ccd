//! Domain model for an expense record and its monthly bucket.
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current on-device bucket schema version. Buckets written before
/// versioning was introduced carry no field and decode as version 1.
pub const BUCKET_SCHEMA_VERSION: u32 = 1;

/// Closed set of expense categories. Serialized as lowercase strings in the
/// on-device schema; any other string fails decode, which is what keeps
/// corrupt categories out of aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Daily,
    Entertainment,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Daily,
        Category::Entertainment,
        Category::Other,
    ];
}

/// A single logged expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Calendar day of the expense, "YYYY-MM-DD" in local time.
    pub date: String,
    /// Amount in whole currency units, 1..=1_000_000.
    pub amount: u32,
    pub category: Category,
    /// Creation instant, milliseconds since the Unix epoch. Drives the
    /// oldest-first ordering of the today view.
    pub timestamp: u64,
    /// Reserved for future remote sync; always false today.
    pub synced: bool,
}

impl Expense {
    /// Generate a unique expense ID from the creation timestamp.
    /// Format: exp-<timestamp_ms>-<4 hex chars>
    /// Example: exp-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        let random_suffix = Self::generate_random_suffix(4);
        format!("exp-{}-{}", timestamp_ms, random_suffix)
    }

    /// Generate a random hex suffix for expense IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:0len$x}", now % (16_u128.pow(len as u32)), len = len)
    }
}

/// Per-category sums. Field names match the persisted schema exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub food: u64,
    pub transport: u64,
    pub daily: u64,
    pub entertainment: u64,
    pub other: u64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Food => self.food,
            Category::Transport => self.transport,
            Category::Daily => self.daily,
            Category::Entertainment => self.entertainment,
            Category::Other => self.other,
        }
    }

    pub fn add(&mut self, category: Category, amount: u64) {
        match category {
            Category::Food => self.food += amount,
            Category::Transport => self.transport += amount,
            Category::Daily => self.daily += amount,
            Category::Entertainment => self.entertainment += amount,
            Category::Other => self.other += amount,
        }
    }

    /// Sum over all categories. Always equals the month total of the bucket
    /// these totals came from.
    pub fn sum(&self) -> u64 {
        self.food + self.transport + self.daily + self.entertainment + self.other
    }
}

/// Derived totals for one monthly bucket. Never mutated independently;
/// always recomputed from the record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all record amounts in the bucket.
    pub month: u64,
    /// Sum of amounts whose date is the current local day.
    pub today: u64,
    #[serde(rename = "byCategory")]
    pub by_category: CategoryTotals,
}

/// One calendar month's records plus their derived totals, persisted as a
/// single value under `expenses_<YYYY>_<MM>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Schema version for future migrations; absent in buckets written by
    /// the pre-versioning app, so decode defaults it.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Records in insertion order, not necessarily date-sorted.
    pub records: Vec<Expense>,
    pub totals: Totals,
}

fn default_schema_version() -> u32 {
    BUCKET_SCHEMA_VERSION
}

impl Default for MonthlyBucket {
    fn default() -> Self {
        Self {
            schema_version: BUCKET_SCHEMA_VERSION,
            records: Vec::new(),
            totals: Totals::default(),
        }
    }
}

impl MonthlyBucket {
    /// The canonical empty bucket: no records, all totals zero.
    pub fn empty() -> Self {
        Self::default()
    }
}
