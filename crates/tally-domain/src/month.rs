//! Validated "YYYY-MM" month tokens.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month expressed as a "YYYY-MM" token.
///
/// Parsing is strict: four-digit year, dash, two-digit month in 1..=12.
/// Malformed tokens are rejected up front rather than carried through as
/// unusable derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Builds a key from explicit parts; `month` must be in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// One-based month number (1–12).
    pub fn month_number(self) -> u32 {
        self.month
    }

    /// Whether the date falls inside this calendar month.
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || MonthKeyError::Malformed(token.to_owned());
        let (year_part, month_part) = token.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let month: u32 = month_part.parse().map_err(|_| malformed())?;
        MonthKey::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Rejection reasons for month tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyError {
    Malformed(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for MonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKeyError::Malformed(token) => {
                write!(f, "month must be formatted as YYYY-MM, got \"{token}\"")
            }
            MonthKeyError::MonthOutOfRange(month) => {
                write!(f, "month number must be 1-12, got {month}")
            }
        }
    }
}

impl std::error::Error for MonthKeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_tokens() {
        let key: MonthKey = "2024-05".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month_number(), 5);
        assert_eq!(key.to_string(), "2024-05");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["2024", "2024-5", "24-05", "2024-00", "2024-13", "2024-ab", "-"] {
            assert!(token.parse::<MonthKey>().is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn contains_matches_year_and_month_only() {
        let key: MonthKey = "2024-05".parse().unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert!(key.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()));
    }

    #[test]
    fn serde_round_trips_as_string() {
        let key: MonthKey = "2024-05".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
