//! Derived view models produced by the analytics engine.
//!
//! Nothing here is persisted; every value is recomputed from transaction
//! and budget snapshots on each query.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::month::MonthKey;
use crate::transaction::Transaction;

/// Total spend for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Total spend for one calendar day.
///
/// The daily series carries an entry for every day of the month, so days
/// without activity show up as explicit zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// One row of the budget-vs-actual table.
///
/// Either side may be zero when the category appears only in the other;
/// a category with neither actual nor budget data never gets a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: Category,
    pub actual: f64,
    pub budget: f64,
    pub difference: f64,
}

/// Classification of a spending insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Over,
    Warning,
    Good,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InsightKind::Over => "over",
            InsightKind::Warning => "warning",
            InsightKind::Good => "good",
        };
        f.write_str(label)
    }
}

/// A classified observation about spend versus budget for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub category: Category,
    pub message: String,
    pub amount: f64,
    pub percentage: f64,
}

/// All-time aggregates for the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_spent: f64,
    pub transaction_count: usize,
    pub top_categories: Vec<CategoryTotal>,
    pub recent_transactions: Vec<Transaction>,
}

/// Everything the analytics endpoint returns for one target month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: MonthKey,
    pub category_totals: Vec<CategoryTotal>,
    pub daily_totals: Vec<DayTotal>,
    pub budget_vs_actual: Vec<BudgetComparison>,
    pub insights: Vec<Insight>,
    pub summary: DashboardSummary,
}
