//! The fixed category set shared by transactions and budgets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of spending categories.
///
/// Serialized by display label so stored documents and HTTP payloads carry
/// the human-readable name ("Food & Dining"), not the variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    Healthcare,
    Utilities,
    Housing,
    Education,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::Healthcare,
        Category::Utilities,
        Category::Housing,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Housing => "Housing",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Chart color assigned to the category, as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Category::FoodAndDining => "#ef4444",
            Category::Transportation => "#3b82f6",
            Category::Shopping => "#8b5cf6",
            Category::Entertainment => "#f59e0b",
            Category::Healthcare => "#10b981",
            Category::Utilities => "#6b7280",
            Category::Housing => "#84cc16",
            Category::Education => "#06b6d4",
            Category::Travel => "#f97316",
            Category::Other => "#a855f7",
        }
    }

    /// Resolves a display label back to its category.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_by_display_label() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::FoodAndDining);
    }

    #[test]
    fn label_round_trips_for_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn unknown_label_resolves_to_none() {
        assert_eq!(Category::from_label("Groceries"), None);
    }
}
