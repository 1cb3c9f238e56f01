use std::time::Duration;

use namecast_domain::NamecastError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Log the outcome of a request with structured fields.
///
/// `route` should be a stable identifier without sensitive data.
#[inline]
pub fn log_request_outcome<T>(route: &str, elapsed: Duration, result: &Result<T, NamecastError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(_) => info!(route, duration_ms, "request_success"),
        Err(err) => warn!(
            route,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "request_failure"
        ),
    }
}

/// Convert a `NamecastError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &NamecastError) -> &'static str {
    match error {
        NamecastError::Configuration(_) => "configuration",
        NamecastError::Authorization(_) => "authorization",
        NamecastError::Store(_) => "store",
        NamecastError::Validation(_) => "validation",
        NamecastError::NotFound(_) => "not_found",
        NamecastError::Network(_) => "network",
        NamecastError::Internal(_) => "internal",
    }
}
