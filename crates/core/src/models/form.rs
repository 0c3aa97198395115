/// Raw contents of the balance input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceForm {
    pub balance: String,
}

impl BalanceForm {
    pub fn new(balance: impl Into<String>) -> Self {
        Self {
            balance: balance.into(),
        }
    }

    pub fn clear(&mut self) {
        self.balance.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.balance.is_empty()
    }
}

/// Raw contents of the four expense inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub time: String,
}

impl ExpenseForm {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.date.clear();
        self.time.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.amount.is_empty()
            && self.date.is_empty()
            && self.time.is_empty()
    }
}
