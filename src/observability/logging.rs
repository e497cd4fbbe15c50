//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, from `main`
//! - Honour `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
//! - Keep status lines plain: no timestamps, no targets

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter,
    Layer,
};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "qrshare=info,tower_http=warn";

/// Build the filter from the environment or the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Formatting layer writing to `writer`.
pub fn fmt_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .compact()
}

/// Install the global subscriber.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(std::io::stderr))
        .init();
}
