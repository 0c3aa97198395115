use serde::{Deserialize, Serialize};

use super::expense::ExpenseRecord;

/// The complete state of a budget session: everything that gets persisted.
///
/// `expenses` is kept in entry order (oldest first), not sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Starting balance set by the user (>= 0 when set)
    #[serde(default)]
    pub initial_balance: f64,

    /// Every accepted expense, in the order it was entered
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl AppState {
    pub fn new(initial_balance: f64, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            initial_balance,
            expenses,
        }
    }

    /// Sum of all recorded expense amounts.
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}
