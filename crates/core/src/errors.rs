use thiserror::Error;

/// Unified error type for the entire spend-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User input ──────────────────────────────────────────────────
    /// Rejected user input. The message is what the user gets to see.
    #[error("{0}")]
    Validation(String),

    // ── Document codec ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (local store) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Remote store / Network ──────────────────────────────────────
    #[error("Store error ({store}): {message}")]
    Store { store: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for errors caused by user input rather than by persistence.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; the auth token rides in the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
