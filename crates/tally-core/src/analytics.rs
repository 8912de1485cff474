//! Pure spend-analytics over transaction and budget snapshots.
//!
//! Every function here is a pure function of its inputs: no I/O, no locks,
//! no hidden state. Monetary arithmetic is plain f64 with no internal
//! rounding; two-decimal rounding happens only in display strings.

use std::collections::HashMap;

use chrono::NaiveDate;

use tally_domain::{
    Budget, BudgetComparison, Category, CategoryTotal, DashboardSummary, DayTotal, Insight,
    InsightKind, MonthKey, MonthlyReport, Transaction,
};

/// Stateless analytics over ledger snapshots.
pub struct Analytics;

impl Analytics {
    /// Per-category spend totals for transactions dated inside `month`.
    ///
    /// Categories with no activity that month get no entry, not a zero.
    /// Entries appear in first-appearance order within the filtered input.
    pub fn monthly_category_totals(
        transactions: &[Transaction],
        month: MonthKey,
    ) -> Vec<CategoryTotal> {
        let filtered: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .collect();
        category_totals(filtered.into_iter())
    }

    /// Spend total for every calendar day of `month`.
    ///
    /// Unlike the category totals, days without activity do get an entry,
    /// as an explicit zero, so the series always covers the whole month.
    pub fn daily_totals(transactions: &[Transaction], month: MonthKey) -> Vec<DayTotal> {
        (1..=31)
            .filter_map(|day| NaiveDate::from_ymd_opt(month.year(), month.month_number(), day))
            .map(|date| DayTotal {
                date,
                total: transactions
                    .iter()
                    .filter(|t| t.date == date)
                    .map(|t| t.amount)
                    .sum(),
            })
            .collect()
    }

    /// Budget-vs-actual rows for the union of categories with activity in
    /// `month` and categories carrying a budget.
    pub fn budget_vs_actual(
        transactions: &[Transaction],
        budgets: &[Budget],
        month: MonthKey,
    ) -> Vec<BudgetComparison> {
        let totals = Self::monthly_category_totals(transactions, month);
        let (budget_order, budget_map) = budget_amounts(budgets);

        let mut rows: Vec<BudgetComparison> = Vec::new();
        for entry in &totals {
            let budget = budget_map.get(&entry.category).copied().unwrap_or(0.0);
            rows.push(BudgetComparison {
                category: entry.category,
                actual: entry.total,
                budget,
                difference: entry.total - budget,
            });
        }
        for category in budget_order {
            if totals.iter().any(|t| t.category == category) {
                continue;
            }
            let budget = budget_map[&category];
            rows.push(BudgetComparison {
                category,
                actual: 0.0,
                budget,
                difference: -budget,
            });
        }
        rows
    }

    /// Classified insights for the month, one threshold insight per budgeted
    /// category plus a closing highest-spend observation.
    ///
    /// Thresholds on `percentage = actual / budget * 100`:
    /// over 100 reports the absolute overage, (80, 100] warns with the
    /// percentage, under 50 notes headroom, and [50, 80] stays silent. A
    /// zero-amount budget yields no insight rather than a division by zero.
    /// The highest-spend insight ranges over all transactions regardless of
    /// month and is omitted when there are none.
    pub fn spending_insights(
        transactions: &[Transaction],
        budgets: &[Budget],
        month: MonthKey,
    ) -> Vec<Insight> {
        let totals = Self::monthly_category_totals(transactions, month);
        let totals_map: HashMap<Category, f64> =
            totals.iter().map(|t| (t.category, t.total)).collect();
        let (budget_order, budget_map) = budget_amounts(budgets);

        let mut insights = Vec::new();
        for category in budget_order {
            let budget = budget_map[&category];
            if budget <= 0.0 {
                continue;
            }
            let actual = totals_map.get(&category).copied().unwrap_or(0.0);
            let difference = actual - budget;
            let percentage = actual / budget * 100.0;

            if percentage > 100.0 {
                insights.push(Insight {
                    kind: InsightKind::Over,
                    category,
                    message: format!("Over budget by ${:.2}", difference.abs()),
                    amount: difference.abs(),
                    percentage,
                });
            } else if percentage > 80.0 {
                insights.push(Insight {
                    kind: InsightKind::Warning,
                    category,
                    message: format!("Close to budget limit ({percentage:.1}%)"),
                    amount: difference,
                    percentage,
                });
            } else if percentage < 50.0 {
                insights.push(Insight {
                    kind: InsightKind::Good,
                    category,
                    message: format!("Well under budget ({percentage:.1}%)"),
                    amount: difference,
                    percentage,
                });
            }
        }

        if let Some(highest) = highest_spending(transactions) {
            insights.push(Insight {
                kind: InsightKind::Warning,
                category: highest.category,
                message: format!("Highest spending category: ${:.2}", highest.total),
                amount: highest.total,
                percentage: 0.0,
            });
        }

        insights
    }

    /// All-time aggregates: total spend, top five categories, five most
    /// recent transactions (stable order on equal dates).
    pub fn dashboard_summary(transactions: &[Transaction]) -> DashboardSummary {
        let total_spent = transactions.iter().map(|t| t.amount).sum();

        let mut top_categories = category_totals(transactions.iter());
        top_categories.sort_by(|a, b| b.total.total_cmp(&a.total));
        top_categories.truncate(5);

        let mut recent_transactions = transactions.to_vec();
        recent_transactions.sort_by(|a, b| b.date.cmp(&a.date));
        recent_transactions.truncate(5);

        DashboardSummary {
            total_spent,
            transaction_count: transactions.len(),
            top_categories,
            recent_transactions,
        }
    }

    /// Composes the full analytics payload for one target month.
    pub fn monthly_report(
        transactions: &[Transaction],
        budgets: &[Budget],
        month: MonthKey,
    ) -> MonthlyReport {
        MonthlyReport {
            month,
            category_totals: Self::monthly_category_totals(transactions, month),
            daily_totals: Self::daily_totals(transactions, month),
            budget_vs_actual: Self::budget_vs_actual(transactions, budgets, month),
            insights: Self::spending_insights(transactions, budgets, month),
            summary: Self::dashboard_summary(transactions),
        }
    }
}

/// Sums amounts per category, preserving first-appearance order.
fn category_totals<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<CategoryTotal> {
    let mut order: Vec<Category> = Vec::new();
    let mut totals: HashMap<Category, f64> = HashMap::new();
    for transaction in transactions {
        if !totals.contains_key(&transaction.category) {
            order.push(transaction.category);
        }
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }
    order
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            total: totals[&category],
        })
        .collect()
}

/// Collapses budgets into per-category amounts.
///
/// Order follows first appearance; on duplicate categories the last amount
/// wins (the store's uniqueness constraint makes duplicates unreachable in
/// practice, but snapshots are caller-supplied).
fn budget_amounts(budgets: &[Budget]) -> (Vec<Category>, HashMap<Category, f64>) {
    let mut order: Vec<Category> = Vec::new();
    let mut amounts: HashMap<Category, f64> = HashMap::new();
    for budget in budgets {
        if !amounts.contains_key(&budget.category) {
            order.push(budget.category);
        }
        amounts.insert(budget.category, budget.amount);
    }
    (order, amounts)
}

/// The single category with the greatest all-time spend, if any.
fn highest_spending(transactions: &[Transaction]) -> Option<CategoryTotal> {
    category_totals(transactions.iter())
        .into_iter()
        .fold(None, |max: Option<CategoryTotal>, entry| match max {
            Some(current) if current.total >= entry.total => Some(current),
            _ => Some(entry),
        })
}
