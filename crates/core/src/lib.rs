pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Arc;

use config::TrackerConfig;
use models::{
    expense::{ExpenseDraft, ExpenseRecord},
    form::ExpenseForm,
    state::AppState,
    view::ViewModel,
};
use services::{
    budget_service::BudgetService,
    persist_service::{PersistService, PersistTicket},
    render_service::RenderService,
};
use storage::traits::StateStore;

use errors::CoreError;

/// Main entry point for the Spend Tracker core library.
///
/// Owns the session's `AppState` and the services that act on it. The state
/// is only ever changed through `set_initial_balance*` and `add_expense*`;
/// each accepted change dispatches a best-effort write to the store and
/// returns without waiting for it.
#[must_use]
pub struct SpendTracker {
    state: AppState,
    budget_service: BudgetService,
    render_service: RenderService,
    persist_service: PersistService,
}

impl std::fmt::Debug for SpendTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpendTracker")
            .field("initial_balance", &self.state.initial_balance)
            .field("expenses", &self.state.expenses.len())
            .field("store", &self.persist_service.store().name())
            .field("writes_dispatched", &self.persist_service.dispatched_count())
            .finish()
    }
}

impl SpendTracker {
    /// Start a session: load the stored document once and fall back to an
    /// empty budget if there is none or it can't be read.
    ///
    /// Never fails; with a broken store the session simply runs in memory.
    /// Does not render; use `start` to get the first view along with the session.
    pub async fn bootstrap(store: Arc<dyn StateStore>) -> Self {
        let state = match store.load().await {
            Ok(Some(state)) => {
                tracing::info!(
                    store = store.name(),
                    initial_balance = state.initial_balance,
                    expenses = state.expenses.len(),
                    "Loaded budget"
                );
                state
            }
            Ok(None) => {
                tracing::info!(store = store.name(), "No saved budget, starting empty");
                AppState::default()
            }
            Err(e) => {
                tracing::warn!(store = store.name(), error = %e, "Failed to load budget, starting empty");
                AppState::default()
            }
        };
        Self::build(state, store)
    }

    /// Bootstrap, then render once for the initial display.
    pub async fn start(store: Arc<dyn StateStore>) -> (Self, ViewModel) {
        let tracker = Self::bootstrap(store).await;
        let view = tracker.render();
        (tracker, view)
    }

    /// Build the configured store and bootstrap from it.
    pub async fn from_config(config: &TrackerConfig) -> Self {
        let store = storage::build_store(&config.store);
        Self::bootstrap(store).await
    }

    /// Start a session from a known state without loading anything.
    pub fn with_state(state: AppState, store: Arc<dyn StateStore>) -> Self {
        Self::build(state, store)
    }

    // ── Balance ─────────────────────────────────────────────────────

    /// Set the starting balance from raw input (e.g. the text of a form field).
    /// Rejects anything that isn't a finite number >= 0.
    pub fn set_initial_balance(&mut self, raw: &str) -> Result<PersistTicket, CoreError> {
        self.budget_service
            .set_initial_balance_raw(&mut self.state, raw)?;
        tracing::debug!(initial_balance = self.state.initial_balance, "Initial balance set");
        Ok(self.persist())
    }

    /// Set the starting balance from an already-parsed value.
    pub fn set_initial_balance_value(&mut self, value: f64) -> Result<PersistTicket, CoreError> {
        self.budget_service
            .set_initial_balance(&mut self.state, value)?;
        tracing::debug!(initial_balance = value, "Initial balance set");
        Ok(self.persist())
    }

    /// Starting balance minus everything spent. May be negative.
    #[must_use]
    pub fn remaining_balance(&self) -> f64 {
        self.budget_service.compute_remaining_balance(&self.state)
    }

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.state.total_spent()
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Record an expense from the raw form fields.
    pub fn add_expense(&mut self, form: &ExpenseForm) -> Result<PersistTicket, CoreError> {
        self.budget_service.add_expense_raw(
            &mut self.state,
            &form.description,
            &form.amount,
            &form.date,
            &form.time,
        )?;
        self.log_added();
        Ok(self.persist())
    }

    /// Record an expense from a typed draft.
    pub fn add_expense_draft(&mut self, draft: ExpenseDraft) -> Result<PersistTicket, CoreError> {
        self.budget_service.add_expense(&mut self.state, draft)?;
        self.log_added();
        Ok(self.persist())
    }

    /// Expenses as they are displayed: most recently entered first.
    #[must_use]
    pub fn expense_list_for_display(&self) -> Vec<&ExpenseRecord> {
        self.state.expenses.iter().rev().collect()
    }

    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.state.expenses.len()
    }

    // ── View ────────────────────────────────────────────────────────

    /// Render the current state for display.
    #[must_use]
    pub fn render(&self) -> ViewModel {
        self.render_service.render_snapshot(&self.state)
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Export the state as pretty-printed JSON, in the stored document shape.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize budget: {e}")))
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// The most recent failed write, unless a later write succeeded.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<String> {
        self.persist_service.last_error()
    }

    /// How many writes this session has dispatched.
    #[must_use]
    pub fn persist_count(&self) -> usize {
        self.persist_service.dispatched_count()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn persist(&self) -> PersistTicket {
        self.persist_service.persist_best_effort(&self.state)
    }

    fn log_added(&self) {
        if let Some(e) = self.state.expenses.last() {
            tracing::debug!(
                description = %e.description,
                amount = e.amount,
                date = %e.date,
                time = %e.time,
                "Expense added"
            );
        }
    }

    fn build(state: AppState, store: Arc<dyn StateStore>) -> Self {
        Self {
            state,
            budget_service: BudgetService::new(),
            render_service: RenderService::new(),
            persist_service: PersistService::new(store),
        }
    }
}
