//! Tracing subscriber setup.
//!
//! The output format follows `logging.format` in the service config:
//! `json` for deployments that ship logs to an aggregator, anything else
//! gets the human-readable pretty writer for local runs. A `RUST_LOG`
//! environment variable overrides the configured level.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber. Called once at startup.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    // Span-close events carry the request span's duration, which covers
    // the per-request timing without a separate timing layer.
    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true);
            subscriber.with(json_layer).init();
        }
        _ => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true);
            subscriber.with(pretty_layer).init();
        }
    }
}
