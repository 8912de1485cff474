//! Guarded CRUD operations for transaction records.

use chrono::NaiveDate;
use uuid::Uuid;

use tally_domain::{Category, Transaction};

use crate::error::{CoreError, CoreResult};
use crate::store::TransactionStore;

/// Caller-supplied fields for creating or replacing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
}

/// Stateless operations over a [`TransactionStore`].
pub struct TransactionService;

impl TransactionService {
    /// All transactions, newest first.
    pub fn list(store: &dyn TransactionStore) -> CoreResult<Vec<Transaction>> {
        let mut transactions = store.list()?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    pub fn create(store: &dyn TransactionStore, draft: TransactionDraft) -> CoreResult<Transaction> {
        validate(&draft)?;
        let transaction =
            Transaction::new(draft.amount, draft.date, draft.description, draft.category);
        store.insert(transaction.clone())?;
        tracing::debug!(id = %transaction.id, "transaction recorded");
        Ok(transaction)
    }

    /// Replaces every mutable field of the transaction with the given id.
    pub fn update(
        store: &dyn TransactionStore,
        id: Uuid,
        draft: TransactionDraft,
    ) -> CoreResult<Transaction> {
        validate(&draft)?;
        let transaction = Transaction {
            id,
            amount: draft.amount,
            date: draft.date,
            description: draft.description,
            category: draft.category,
        };
        if store.update(transaction.clone())? {
            Ok(transaction)
        } else {
            Err(CoreError::NotFound(format!("transaction {id}")))
        }
    }

    pub fn delete(store: &dyn TransactionStore, id: Uuid) -> CoreResult<()> {
        if store.delete(id)? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("transaction {id}")))
        }
    }
}

fn validate(draft: &TransactionDraft) -> CoreResult<()> {
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(CoreError::Validation(
            "amount must be a positive number".into(),
        ));
    }
    if draft.description.trim().is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    Ok(())
}
