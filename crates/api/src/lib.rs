//! # Namecast API
//!
//! HTTP and CLI application layer.
//!
//! This crate contains:
//! - axum routes (batch, settings, user hooks)
//! - Application context (dependency injection)
//! - Logging helpers and the `namecast` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod errors;
pub mod routes;
pub mod utils;

pub use context::{AppContext, LocalBatchTransport};
pub use errors::{ApiError, ApiResult};
pub use routes::router;
