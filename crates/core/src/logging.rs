use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Returns `false` if a
/// subscriber was already installed (the existing one is kept).
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("spend_tracker_core={}", config.level)))
        .unwrap_or_else(|e| {
            eprintln!("invalid log level '{}' ({e}), using info", config.level);
            EnvFilter::new("spend_tracker_core=info")
        });

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format == "json" {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.is_ok()
}
