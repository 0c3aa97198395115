use crate::errors::CoreError;
use crate::models::expense::{ExpenseDraft, ExpenseRecord};
use crate::models::state::AppState;

/// Shown when a new starting balance is rejected.
pub const INVALID_BALANCE_MESSAGE: &str = "Please enter a valid positive number";

/// Shown when a new expense is rejected.
pub const INVALID_EXPENSE_MESSAGE: &str = "Please enter a valid description, amount, date, and time";

/// Balance arithmetic and the validation rules for changing the budget.
///
/// Pure business logic: no I/O, no logging of its own. Every mutating
/// operation either applies completely or leaves the state untouched.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Starting balance minus everything spent. May go negative.
    pub fn compute_remaining_balance(&self, state: &AppState) -> f64 {
        state.initial_balance - state.total_spent()
    }

    /// Replace the starting balance. `value` must be finite and >= 0.
    pub fn set_initial_balance(&self, state: &mut AppState, value: f64) -> Result<(), CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(INVALID_BALANCE_MESSAGE.into()));
        }
        state.initial_balance = value;
        Ok(())
    }

    /// Parse raw input and replace the starting balance with it.
    pub fn set_initial_balance_raw(&self, state: &mut AppState, raw: &str) -> Result<(), CoreError> {
        let value = parse_amount(raw)
            .ok_or_else(|| CoreError::Validation(INVALID_BALANCE_MESSAGE.into()))?;
        self.set_initial_balance(state, value)
    }

    /// Validate a draft and append it as the newest expense.
    ///
    /// The description is stored trimmed; date and time are kept as given and
    /// only need to be non-empty.
    pub fn add_expense(&self, state: &mut AppState, draft: ExpenseDraft) -> Result<(), CoreError> {
        let record = self.validate_expense(draft)?;
        state.expenses.push(record);
        Ok(())
    }

    /// Parse the raw amount field, then behave like `add_expense`.
    pub fn add_expense_raw(
        &self,
        state: &mut AppState,
        description: &str,
        amount: &str,
        date: &str,
        time: &str,
    ) -> Result<(), CoreError> {
        let amount = parse_amount(amount)
            .ok_or_else(|| CoreError::Validation(INVALID_EXPENSE_MESSAGE.into()))?;
        self.add_expense(state, ExpenseDraft::new(description, amount, date, time))
    }

    fn validate_expense(&self, draft: ExpenseDraft) -> Result<ExpenseRecord, CoreError> {
        let description = draft.description.trim();
        let valid = !description.is_empty()
            && draft.amount.is_finite()
            && draft.amount > 0.0
            && !draft.date.is_empty()
            && !draft.time.is_empty();

        if !valid {
            return Err(CoreError::Validation(INVALID_EXPENSE_MESSAGE.into()));
        }

        Ok(ExpenseRecord {
            description: description.to_string(),
            amount: draft.amount,
            date: draft.date,
            time: draft.time,
        })
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a numeric form field. Surrounding whitespace is ignored; anything
/// that is not a finite decimal number yields `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
