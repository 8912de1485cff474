//! End-to-end analytics scenario over one month of activity.

use chrono::NaiveDate;

use tally_core::Analytics;
use tally_domain::{Budget, Category, InsightKind, MonthKey, Transaction};

fn txn(category: Category, amount: f64, day: &str) -> Transaction {
    Transaction::new(amount, day.parse::<NaiveDate>().unwrap(), "scenario", category)
}

#[test]
fn may_2024_scenario_produces_expected_artifacts() {
    let transactions = [
        txn(Category::FoodAndDining, 50.0, "2024-05-01"),
        txn(Category::FoodAndDining, 30.0, "2024-05-10"),
        txn(Category::Transportation, 20.0, "2024-05-05"),
    ];
    let month: MonthKey = "2024-05".parse().unwrap();
    let budgets = [Budget::new(Category::FoodAndDining, 100.0, month)];

    let report = Analytics::monthly_report(&transactions, &budgets, month);

    // Category totals: Food 80, Transport 20.
    assert_eq!(report.category_totals.len(), 2);
    let food = report
        .category_totals
        .iter()
        .find(|t| t.category == Category::FoodAndDining)
        .unwrap();
    let transport = report
        .category_totals
        .iter()
        .find(|t| t.category == Category::Transportation)
        .unwrap();
    assert_eq!(food.total, 80.0);
    assert_eq!(transport.total, 20.0);

    // Budget-vs-actual carries both the budgeted and the unbudgeted row.
    let food_row = report
        .budget_vs_actual
        .iter()
        .find(|r| r.category == Category::FoodAndDining)
        .unwrap();
    assert_eq!(food_row.actual, 80.0);
    assert_eq!(food_row.budget, 100.0);
    assert_eq!(food_row.difference, -20.0);

    let transport_row = report
        .budget_vs_actual
        .iter()
        .find(|r| r.category == Category::Transportation)
        .unwrap();
    assert_eq!(transport_row.actual, 20.0);
    assert_eq!(transport_row.budget, 0.0);
    assert_eq!(transport_row.difference, 20.0);

    // Food sits exactly at 80%, the inclusive upper bound of the neutral
    // zone, so the only insight is the closing highest-spend observation.
    assert_eq!(report.insights.len(), 1);
    let highest = &report.insights[0];
    assert_eq!(highest.kind, InsightKind::Warning);
    assert_eq!(highest.category, Category::FoodAndDining);
    assert_eq!(highest.message, "Highest spending category: $80.00");

    // Daily series spans all of May with zeros on quiet days.
    assert_eq!(report.daily_totals.len(), 31);
    assert_eq!(report.daily_totals[0].total, 50.0);
    assert_eq!(report.daily_totals[1].total, 0.0);
    assert_eq!(report.daily_totals[4].total, 20.0);
    assert_eq!(report.daily_totals[9].total, 30.0);

    // Dashboard aggregates are unfiltered.
    assert_eq!(report.summary.total_spent, 100.0);
    assert_eq!(report.summary.transaction_count, 3);
}
