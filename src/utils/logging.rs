//! Tracing subscriber setup

use crate::config::LoggingConfig;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    LOGGING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
        let registry = tracing_subscriber::registry().with(filter);

        if config.json {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().json().with_target(false))
                .try_init();
        } else {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .try_init();
        }
    });
}
