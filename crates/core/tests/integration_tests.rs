// ═══════════════════════════════════════════════════════════════════
// Integration Tests — full sessions through SpendTracker
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use spend_tracker_core::config::{StoreBackend, TrackerConfig};
use spend_tracker_core::models::expense::{ExpenseDraft, ExpenseRecord};
use spend_tracker_core::models::form::ExpenseForm;
use spend_tracker_core::models::state::AppState;
use spend_tracker_core::storage::file::FileStore;
use spend_tracker_core::storage::memory::MemoryStore;
use spend_tracker_core::SpendTracker;

async fn fresh_session(store: &MemoryStore) -> SpendTracker {
    SpendTracker::bootstrap(Arc::new(store.clone())).await
}

// ── Bootstrap ───────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_session_starts_empty() {
    let store = MemoryStore::new();
    let tracker = fresh_session(&store).await;

    let view = tracker.render();
    assert_eq!(view.remaining_balance_display, "$0.00");
    assert!(view.transactions.is_empty());
    assert_eq!(tracker.state(), &AppState::default());
    assert_eq!(store.load_count(), 1);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn start_renders_initial_view() {
    let saved = AppState::new(
        20.0,
        vec![ExpenseRecord {
            description: "Tea".into(),
            amount: 2.5,
            date: "2024-01-02".into(),
            time: "09:15".into(),
        }],
    );
    let store = MemoryStore::with_state(&saved).unwrap();
    let (tracker, view) = SpendTracker::start(Arc::new(store.clone())).await;

    assert_eq!(view.remaining_balance_display, "$17.50");
    assert_eq!(view.transactions[0].to_string(), "Tea — 2024-01-02 09:15 — $2.50");
    assert_eq!(view, tracker.render());
    assert_eq!(store.load_count(), 1);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn bootstrap_restores_saved_state() {
    let saved = AppState::new(
        100.0,
        vec![ExpenseRecord {
            description: "Coffee".into(),
            amount: 4.5,
            date: "2024-01-01".into(),
            time: "08:00".into(),
        }],
    );
    let store = MemoryStore::with_state(&saved).unwrap();
    let tracker = fresh_session(&store).await;

    assert_eq!(tracker.state(), &saved);
    assert_eq!(tracker.remaining_balance(), 95.5);
}

#[tokio::test]
async fn bootstrap_survives_failed_load() {
    let store = MemoryStore::with_state(&AppState::new(50.0, vec![])).unwrap();
    store.set_fail_loads(true);
    let mut tracker = fresh_session(&store).await;

    assert_eq!(tracker.state(), &AppState::default());

    // Still fully usable in memory.
    let _ = tracker.set_initial_balance("10").unwrap();
    assert_eq!(tracker.remaining_balance(), 10.0);
}

#[tokio::test]
async fn bootstrap_survives_corrupt_document() {
    let store = MemoryStore::with_raw_document("{\"initialBalance\": \"lots\"}");
    let tracker = fresh_session(&store).await;
    assert_eq!(tracker.state(), &AppState::default());
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn coffee_scenario() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;

    let _ = tracker.set_initial_balance("100.00").unwrap();
    let _ = tracker
        .add_expense(&ExpenseForm::new("Coffee", "4.50", "2024-01-01", "08:00"))
        .unwrap();

    let view = tracker.render();
    assert_eq!(view.remaining_balance_display, "$95.50");
    let rows: Vec<String> = view.transactions.iter().map(ToString::to_string).collect();
    assert_eq!(rows, vec!["Coffee — 2024-01-01 08:00 — $4.50".to_string()]);
}

#[tokio::test]
async fn rejected_balance_issues_no_write() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;
    let _ = tracker.set_initial_balance("30").unwrap();
    let before = tracker.state().clone();
    let writes = tracker.persist_count();

    assert!(tracker.set_initial_balance("-5").unwrap_err().is_validation());
    assert_eq!(tracker.state(), &before);
    assert_eq!(tracker.persist_count(), writes);
    assert_eq!(tracker.render().remaining_balance_display, "$30.00");
}

#[tokio::test]
async fn display_order_is_reverse_entry_order() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;
    for name in ["E1", "E2", "E3"] {
        let _ = tracker
            .add_expense_draft(ExpenseDraft::new(name, 1.0, "2024-01-01", "08:00"))
            .unwrap();
    }

    let shown: Vec<&str> = tracker
        .expense_list_for_display()
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(shown, vec!["E3", "E2", "E1"]);

    let stored: Vec<&str> = tracker
        .state()
        .expenses
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(stored, vec!["E1", "E2", "E3"]);
}

#[tokio::test]
async fn remaining_balance_tracks_all_changes() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;

    let _ = tracker.add_expense_draft(ExpenseDraft::new("a", 12.25, "d", "t")).unwrap();
    let _ = tracker.set_initial_balance_value(200.0).unwrap();
    let _ = tracker.add_expense_draft(ExpenseDraft::new("b", 7.75, "d", "t")).unwrap();
    let _ = tracker.set_initial_balance_value(50.0).unwrap();

    assert_eq!(tracker.total_spent(), 20.0);
    assert_eq!(tracker.remaining_balance(), 30.0);
}

// ── Persistence across sessions ─────────────────────────────────────

#[tokio::test]
async fn next_session_sees_last_write() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;

    let first = tracker.set_initial_balance("100").unwrap();
    let second = tracker
        .add_expense(&ExpenseForm::new("Lunch", "12", "2024-05-01", "12:00"))
        .unwrap();
    assert!(first.finished().await);
    assert!(second.finished().await);
    assert_eq!(store.save_count(), 2);

    let next = fresh_session(&store).await;
    assert_eq!(next.state(), tracker.state());
    assert_eq!(next.render(), tracker.render());
}

#[tokio::test]
async fn failed_write_is_reported_then_cleared() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;

    store.set_fail_saves(true);
    assert!(!tracker.set_initial_balance("5").unwrap().finished().await);
    let err = tracker.last_persist_error().unwrap();
    assert!(err.contains("Memory"), "{err}");

    store.set_fail_saves(false);
    assert!(tracker.set_initial_balance("6").unwrap().finished().await);
    assert_eq!(tracker.last_persist_error(), None);
    assert_eq!(store.stored_state().unwrap(), Some(AppState::new(6.0, vec![])));
}

#[test]
fn without_runtime_changes_still_apply() {
    let store = MemoryStore::new();
    let mut tracker = SpendTracker::with_state(AppState::default(), Arc::new(store.clone()));

    let ticket = tracker.set_initial_balance("15").unwrap();
    assert!(ticket.is_finished());
    assert_eq!(tracker.remaining_balance(), 15.0);
    assert!(tracker.last_persist_error().is_some());
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn file_backed_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.json");

    let mut tracker = SpendTracker::bootstrap(Arc::new(FileStore::new(&path))).await;
    let _ = tracker.set_initial_balance("80").unwrap().finished().await;
    assert!(tracker
        .add_expense(&ExpenseForm::new("Book", "19.99", "2024-06-01", "15:30"))
        .unwrap()
        .finished()
        .await);

    let reopened = SpendTracker::bootstrap(Arc::new(FileStore::new(&path))).await;
    assert_eq!(reopened.render().remaining_balance_display, "$60.01");
}

#[tokio::test]
async fn from_config_memory_backend() {
    let mut config = TrackerConfig::default();
    config.store.backend = StoreBackend::Memory;

    let tracker = SpendTracker::from_config(&config).await;
    assert_eq!(tracker.state(), &AppState::default());
    assert!(format!("{tracker:?}").contains("Memory"));
}

#[tokio::test]
async fn json_export_uses_document_shape() {
    let store = MemoryStore::new();
    let mut tracker = fresh_session(&store).await;
    let _ = tracker.set_initial_balance("1").unwrap();

    let json: serde_json::Value = serde_json::from_str(&tracker.to_json().unwrap()).unwrap();
    assert_eq!(json["initialBalance"], 1.0);
    assert!(json["expenses"].as_array().unwrap().is_empty());
}
