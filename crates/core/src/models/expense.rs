use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Date format produced by a date input (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format produced by a time input (`HH:MM`).
pub const TIME_FORMAT: &str = "%H:%M";

/// A single recorded expense.
///
/// Records are append-only: once stored they are never edited or removed.
/// `date` and `time` are kept exactly as the user typed them; they are
/// required to be present but are not checked for realism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// What the money was spent on (trimmed, never empty)
    pub description: String,

    /// Amount spent (always > 0)
    pub amount: f64,

    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Time of day, `HH:MM`
    pub time: String,
}

/// Unvalidated input for a new expense.
///
/// Passed to `BudgetService::add_expense`, which turns it into an
/// `ExpenseRecord` or rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub time: String,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date: date.into(),
            time: time.into(),
        }
    }

    /// Build a draft from a timestamp, splitting it into the same
    /// date/time strings the form inputs would produce.
    pub fn from_datetime(description: impl Into<String>, amount: f64, at: NaiveDateTime) -> Self {
        Self::new(
            description,
            amount,
            at.format(DATE_FORMAT).to_string(),
            at.format(TIME_FORMAT).to_string(),
        )
    }
}
