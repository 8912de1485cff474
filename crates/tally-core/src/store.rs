//! Persistence boundary for transactions and budgets.
//!
//! The core issues these operations opaquely and interprets only three
//! outcomes: found/not-found, inserted/updated, and uniqueness violation.

use thiserror::Error;
use uuid::Uuid;

use tally_domain::{Budget, Category, MonthKey, Transaction};

/// Failures surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The (category, month) uniqueness constraint on budgets was violated.
    #[error("duplicate budget for {category} in {month}")]
    Duplicate { category: String, month: String },
    #[error("storage I/O failure: {0}")]
    Io(String),
    #[error("corrupt store data: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Storage operations for transaction records.
pub trait TransactionStore: Send + Sync {
    fn list(&self) -> Result<Vec<Transaction>, StoreError>;
    fn find(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;
    fn insert(&self, transaction: Transaction) -> Result<(), StoreError>;
    /// Replaces the record with the same id. Returns `false` when absent.
    fn update(&self, transaction: Transaction) -> Result<bool, StoreError>;
    /// Returns `false` when no record carried the id.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Storage operations for budget records.
///
/// Implementations must declare a uniqueness constraint on the
/// (category, month) pair and report violations as [`StoreError::Duplicate`];
/// that constraint is the atomicity backstop for the ledger's
/// find-then-upsert sequence.
pub trait BudgetStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<Budget>, StoreError>;
    fn list_for_month(&self, month: MonthKey) -> Result<Vec<Budget>, StoreError>;
    fn find_by_category_month(
        &self,
        category: Category,
        month: MonthKey,
    ) -> Result<Option<Budget>, StoreError>;
    fn insert(&self, budget: Budget) -> Result<(), StoreError>;
    /// Replaces only the amount. Returns the updated record, `None` when absent.
    fn update_amount(&self, id: Uuid, amount: f64) -> Result<Option<Budget>, StoreError>;
    /// Returns `false` when no record carried the id.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
