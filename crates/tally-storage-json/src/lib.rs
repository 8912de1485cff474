//! tally-storage-json
//!
//! Filesystem-backed JSON persistence for transactions and budgets. One
//! document per collection under a data directory, written atomically via a
//! temp file and rename. All access runs under one interior mutex, which
//! makes the budget uniqueness check-and-insert a single atomic step.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use tally_core::store::{BudgetStore, StoreError, TransactionStore};
use tally_domain::{Budget, Category, MonthKey, Transaction};

const TRANSACTIONS_FILE: &str = "transactions.json";
const BUDGETS_FILE: &str = "budgets.json";
const TMP_EXTENSION: &str = "tmp";

/// JSON document store holding both collections.
pub struct JsonStore {
    transactions_path: PathBuf,
    budgets_path: PathBuf,
    state: Mutex<StoreState>,
}

struct StoreState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl JsonStore {
    /// Opens (or initializes) the store under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)?;
        let transactions_path = dir.join(TRANSACTIONS_FILE);
        let budgets_path = dir.join(BUDGETS_FILE);
        let transactions = load_collection(&transactions_path)?;
        let budgets = load_collection(&budgets_path)?;
        tracing::debug!(
            dir = %dir.display(),
            transactions = transactions.len(),
            budgets = budgets.len(),
            "opened json store"
        );
        Ok(Self {
            transactions_path,
            budgets_path,
            state: Mutex::new(StoreState {
                transactions,
                budgets,
            }),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Persists `next` as the transactions collection, then commits it to
    /// memory. A failed write leaves the in-memory state untouched, so
    /// memory and disk never diverge on the error branch.
    fn commit_transactions(
        &self,
        state: &mut StoreState,
        next: Vec<Transaction>,
    ) -> Result<(), StoreError> {
        write_collection(&self.transactions_path, &next)?;
        state.transactions = next;
        Ok(())
    }

    /// Same persist-then-commit discipline for the budgets collection.
    fn commit_budgets(&self, state: &mut StoreState, next: Vec<Budget>) -> Result<(), StoreError> {
        write_collection(&self.budgets_path, &next)?;
        state.budgets = next;
        Ok(())
    }
}

impl TransactionStore for JsonStore {
    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.lock_state().transactions.clone())
    }

    fn find(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(self
            .lock_state()
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    fn insert(&self, transaction: Transaction) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        let mut next = state.transactions.clone();
        next.push(transaction);
        self.commit_transactions(&mut state, next)
    }

    fn update(&self, transaction: Transaction) -> Result<bool, StoreError> {
        let mut state = self.lock_state();
        let mut next = state.transactions.clone();
        let Some(slot) = next.iter_mut().find(|t| t.id == transaction.id) else {
            return Ok(false);
        };
        *slot = transaction;
        self.commit_transactions(&mut state, next)?;
        Ok(true)
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.lock_state();
        let mut next = state.transactions.clone();
        next.retain(|t| t.id != id);
        if next.len() == state.transactions.len() {
            return Ok(false);
        }
        self.commit_transactions(&mut state, next)?;
        Ok(true)
    }
}

impl BudgetStore for JsonStore {
    fn list_all(&self) -> Result<Vec<Budget>, StoreError> {
        Ok(self.lock_state().budgets.clone())
    }

    fn list_for_month(&self, month: MonthKey) -> Result<Vec<Budget>, StoreError> {
        Ok(self
            .lock_state()
            .budgets
            .iter()
            .filter(|b| b.month == month)
            .cloned()
            .collect())
    }

    fn find_by_category_month(
        &self,
        category: Category,
        month: MonthKey,
    ) -> Result<Option<Budget>, StoreError> {
        Ok(self
            .lock_state()
            .budgets
            .iter()
            .find(|b| b.category == category && b.month == month)
            .cloned())
    }

    fn insert(&self, budget: Budget) -> Result<(), StoreError> {
        let mut state = self.lock_state();
        // The uniqueness constraint on (category, month); checked and
        // inserted under the same lock.
        if state
            .budgets
            .iter()
            .any(|b| b.category == budget.category && b.month == budget.month)
        {
            return Err(StoreError::Duplicate {
                category: budget.category.label().to_owned(),
                month: budget.month.to_string(),
            });
        }
        let mut next = state.budgets.clone();
        next.push(budget);
        self.commit_budgets(&mut state, next)
    }

    fn update_amount(&self, id: Uuid, amount: f64) -> Result<Option<Budget>, StoreError> {
        let mut state = self.lock_state();
        let mut next = state.budgets.clone();
        let Some(slot) = next.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        slot.amount = amount;
        let updated = slot.clone();
        self.commit_budgets(&mut state, next)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.lock_state();
        let mut next = state.budgets.clone();
        next.retain(|b| b.id != id);
        if next.len() == state.budgets.len() {
            return Ok(false);
        }
        self.commit_budgets(&mut state, next)?;
        Ok(true)
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let payload = fs::read(path)?;
    serde_json::from_slice(&payload)
        .map_err(|err| StoreError::Corrupt(format!("{}: {err}", path.display())))
}

fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(records)
        .map_err(|err| StoreError::Corrupt(err.to_string()))?;
    let tmp = path.with_extension(TMP_EXTENSION);
    let mut file = File::create(&tmp)?;
    file.write_all(&payload)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
