//! Domain model for per-category monthly budgets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::month::MonthKey;

/// A spending limit for one category in one calendar month.
///
/// Invariant: at most one budget exists per (category, month) pair. The
/// store enforces it as a uniqueness constraint; the upsert rule in
/// tally-core re-derives it logically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: Category,
    pub amount: f64,
    pub month: MonthKey,
    pub year: i32,
    pub month_number: u32,
}

impl Budget {
    /// Builds a budget, deriving `year` and `month_number` from the key.
    pub fn new(category: Category, amount: f64, month: MonthKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            amount,
            month,
            year: month.year(),
            month_number: month.month_number(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_year_and_month_number_from_key() {
        let month: MonthKey = "2024-05".parse().unwrap();
        let budget = Budget::new(Category::FoodAndDining, 100.0, month);
        assert_eq!(budget.year, 2024);
        assert_eq!(budget.month_number, 5);
    }

    #[test]
    fn serializes_month_as_token() {
        let month: MonthKey = "2024-11".parse().unwrap();
        let budget = Budget::new(Category::Travel, 250.0, month);
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["month"], "2024-11");
        assert_eq!(value["category"], "Travel");
        assert_eq!(value["month_number"], 11);
    }
}
