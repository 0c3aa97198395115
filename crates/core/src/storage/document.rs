use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::expense::ExpenseRecord;
use crate::models::state::AppState;

/// Fixed key of the budget document in the remote store.
pub const DEFAULT_DOCUMENT_PATH: &str = "spendTrackerData";

/// Serialize the full state to the JSON document shape:
///
/// ```text
/// { "initialBalance": 100.0,
///   "expenses": [ { "description": "Coffee", "amount": 4.5,
///                   "date": "2024-01-01", "time": "08:00" } ] }
/// ```
pub fn encode(state: &AppState) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(state)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize budget document: {e}")))
}

/// Parse a stored document. A JSON `null` (or an empty body) means no
/// document exists yet.
///
/// The realtime database does not keep empty arrays or default fields, and
/// may hand an array back as an object keyed by index, so decoding is lenient
/// about all three.
pub fn decode(bytes: &[u8]) -> Result<Option<AppState>, CoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let stored: Option<StoredDocument> = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::Deserialization(format!("Failed to parse budget document: {e}")))?;

    match stored {
        None => Ok(None),
        Some(doc) => {
            let expenses = match doc.expenses {
                None => Vec::new(),
                Some(list) => list.into_records()?,
            };
            Ok(Some(AppState {
                initial_balance: doc.initial_balance.unwrap_or(0.0),
                expenses,
            }))
        }
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    #[serde(default)]
    initial_balance: Option<f64>,

    #[serde(default)]
    expenses: Option<StoredExpenses>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredExpenses {
    /// Plain array; holes left by the store come back as `null`.
    List(Vec<Option<ExpenseRecord>>),
    /// Object keyed by array index ("0", "1", ...).
    Keyed(BTreeMap<String, ExpenseRecord>),
}

impl StoredExpenses {
    fn into_records(self) -> Result<Vec<ExpenseRecord>, CoreError> {
        match self {
            StoredExpenses::List(items) => Ok(items.into_iter().flatten().collect()),
            StoredExpenses::Keyed(map) => {
                let mut indexed = Vec::with_capacity(map.len());
                for (key, record) in map {
                    let idx: u64 = key.parse().map_err(|_| {
                        CoreError::Deserialization(format!(
                            "Unexpected expense key '{key}': expected an array index"
                        ))
                    })?;
                    indexed.push((idx, record));
                }
                // BTreeMap orders "10" before "2"; sort numerically.
                indexed.sort_by_key(|(idx, _)| *idx);
                Ok(indexed.into_iter().map(|(_, r)| r).collect())
            }
        }
    }
}
