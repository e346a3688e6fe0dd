//! Logging setup. Production emits flattened JSON lines; every other
//! environment gets colored output for local work.

use crate::config::AppConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset. Upstream HTTP clients are noisy at info.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Call once, before the server starts.
pub fn init_logging(config: &AppConfig) {
    let registry = tracing_subscriber::registry().with(env_filter());

    if config.is_production() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    tracing::debug!(environment = %config.environment, "Logging initialized");
}
