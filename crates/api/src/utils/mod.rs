//! Shared helpers for the API layer

pub mod logging;

pub use logging::{error_label, init_tracing, log_request_outcome};
