use serde::Serialize;

/// One rendered row of the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub description: String,
    pub date: String,
    pub time: String,
    pub amount: f64,
    /// `amount` formatted as currency (e.g. "$4.50")
    pub amount_display: String,
}

impl std::fmt::Display for TransactionRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} — {} {} — {}",
            self.description, self.date, self.time, self.amount_display
        )
    }
}

/// Everything the interface needs to draw the budget, produced fresh on
/// every render. The transaction list is newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub remaining_balance: f64,
    /// `remaining_balance` formatted as currency (e.g. "$95.50")
    pub remaining_balance_display: String,
    pub transactions: Vec<TransactionRow>,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
