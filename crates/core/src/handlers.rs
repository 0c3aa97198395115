//! Input handlers
//!
//! Each handler takes one submitted form through
//! `Idle -> Validating -> Accepted | Rejected`:
//!
//! - **Accepted**: the state is changed, a best-effort write is dispatched,
//!   a fresh view is rendered and the form is cleared.
//! - **Rejected**: nothing changes, nothing is written, the form keeps its
//!   contents and the caller gets a notification to show the user.

use crate::models::form::{BalanceForm, ExpenseForm};
use crate::models::view::ViewModel;
use crate::services::persist_service::PersistTicket;
use crate::SpendTracker;

/// Where a handler invocation ended up.
#[derive(Debug)]
pub enum HandlerOutcome {
    Accepted {
        /// The re-rendered view after the change
        view: ViewModel,
        /// The dispatched write; safe to drop
        persist: PersistTicket,
    },
    Rejected {
        /// Blocking notification for the user
        notification: String,
    },
}

impl HandlerOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, HandlerOutcome::Accepted { .. })
    }

    pub fn notification(&self) -> Option<&str> {
        match self {
            HandlerOutcome::Rejected { notification } => Some(notification),
            HandlerOutcome::Accepted { .. } => None,
        }
    }

    pub fn view(&self) -> Option<&ViewModel> {
        match self {
            HandlerOutcome::Accepted { view, .. } => Some(view),
            HandlerOutcome::Rejected { .. } => None,
        }
    }
}

/// Handle a submitted balance form.
pub fn handle_set_balance(tracker: &mut SpendTracker, form: &mut BalanceForm) -> HandlerOutcome {
    match tracker.set_initial_balance(&form.balance) {
        Ok(persist) => {
            form.clear();
            HandlerOutcome::Accepted {
                view: tracker.render(),
                persist,
            }
        }
        Err(e) => {
            tracing::debug!(input = %form.balance, "Balance rejected");
            HandlerOutcome::Rejected {
                notification: e.to_string(),
            }
        }
    }
}

/// Handle a submitted expense form.
pub fn handle_add_expense(tracker: &mut SpendTracker, form: &mut ExpenseForm) -> HandlerOutcome {
    match tracker.add_expense(form) {
        Ok(persist) => {
            form.clear();
            HandlerOutcome::Accepted {
                view: tracker.render(),
                persist,
            }
        }
        Err(e) => {
            tracing::debug!(
                description = %form.description,
                amount = %form.amount,
                "Expense rejected"
            );
            HandlerOutcome::Rejected {
                notification: e.to_string(),
            }
        }
    }
}
