//! Upsert rule and guarded mutations for budget records.

use uuid::Uuid;

use tally_domain::{Budget, Category, MonthKey};

use crate::error::{CoreError, CoreResult};
use crate::store::{BudgetStore, StoreError};

/// Whether an upsert produced a fresh record or amended an existing one.
///
/// The HTTP boundary reflects this as 201 versus 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Stateless operations over a [`BudgetStore`].
pub struct BudgetLedger;

impl BudgetLedger {
    /// Sets the budget for a (category, month) pair.
    ///
    /// A pair that already has a record gets its amount replaced in place;
    /// otherwise a new record is inserted. The find-then-decide sequence is
    /// not atomic against a concurrent upsert for the same pair; the store's
    /// uniqueness constraint converts a lost insert race into
    /// [`CoreError::Conflict`], which callers may retry as an update.
    pub fn upsert(
        store: &dyn BudgetStore,
        category: Category,
        amount: f64,
        month: MonthKey,
    ) -> CoreResult<(Budget, UpsertOutcome)> {
        validate_amount(amount)?;

        if let Some(existing) = store.find_by_category_month(category, month)? {
            let updated = store
                .update_amount(existing.id, amount)?
                .ok_or_else(|| CoreError::NotFound(format!("budget {}", existing.id)))?;
            tracing::debug!(%category, %month, amount, "budget amount replaced");
            return Ok((updated, UpsertOutcome::Updated));
        }

        let budget = Budget::new(category, amount, month);
        match store.insert(budget.clone()) {
            Ok(()) => {
                tracing::debug!(%category, %month, amount, "budget created");
                Ok((budget, UpsertOutcome::Created))
            }
            Err(err @ StoreError::Duplicate { .. }) => {
                tracing::warn!(%category, %month, "lost upsert race, surfacing conflict");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the amount of the budget with the given id.
    ///
    /// Category and month are not changeable through this path.
    pub fn update_amount(store: &dyn BudgetStore, id: Uuid, amount: f64) -> CoreResult<Budget> {
        validate_amount(amount)?;
        store
            .update_amount(id, amount)?
            .ok_or_else(|| CoreError::NotFound(format!("budget {id}")))
    }

    /// Deletes the budget with the given id.
    pub fn delete(store: &dyn BudgetStore, id: Uuid) -> CoreResult<()> {
        if store.delete(id)? {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("budget {id}")))
        }
    }

    /// All budgets recorded for a month, ordered by category label.
    pub fn budgets_for_month(store: &dyn BudgetStore, month: MonthKey) -> CoreResult<Vec<Budget>> {
        let mut budgets = store.list_for_month(month)?;
        budgets.sort_by(|a, b| a.category.label().cmp(b.category.label()));
        Ok(budgets)
    }
}

fn validate_amount(amount: f64) -> CoreResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "amount must be a positive number".into(),
        ));
    }
    Ok(())
}
