//! # Namecast Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - SQLite user and settings stores (r2d2 pool)
//! - The HTTP transport used by the batch progress loop
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `namecast-core`
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use database::{DbManager, SqliteSettingsStore, SqliteUserStore};
pub use errors::InfraError;
pub use http::{BatchEndpointClient, HttpClient};
