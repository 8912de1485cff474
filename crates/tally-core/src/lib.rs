//! tally-core
//!
//! Business logic for the tally expense tracker: the sliding-window rate
//! limiter, the budget ledger upsert rule, the transaction service, and the
//! pure analytics engine. Depends on tally-domain; storage is reached only
//! through the traits in [`store`].

pub mod analytics;
pub mod budget_ledger;
pub mod error;
pub mod rate_limit;
pub mod store;
pub mod transactions;

pub use analytics::Analytics;
pub use budget_ledger::{BudgetLedger, UpsertOutcome};
pub use error::{CoreError, CoreResult};
pub use rate_limit::{Admission, RateLimitConfig, RateLimiter, UNKNOWN_CLIENT};
pub use store::{BudgetStore, StoreError, TransactionStore};
pub use transactions::{TransactionDraft, TransactionService};
