//! tally-domain
//!
//! Serde-enabled domain models for the tally expense tracker.
//! No business logic, no storage, no HTTP concerns.

pub mod budget;
pub mod category;
pub mod month;
pub mod report;
pub mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use month::{MonthKey, MonthKeyError};
pub use report::{
    BudgetComparison, CategoryTotal, DashboardSummary, DayTotal, Insight, InsightKind,
    MonthlyReport,
};
pub use transaction::Transaction;
