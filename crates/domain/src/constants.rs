//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Users fetched per batch page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Per-page client timeout for batch requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings key holding the ordered field selection.
pub const FIELD_SELECTION_KEY: &str = "display_name_fields";

/// Separator placed between display-name tokens.
pub const NAME_TOKEN_SEPARATOR: &str = " ";

// Server defaults
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "namecast.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Message surfaced when a batch page request exceeds its timeout.
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timeout - please try again";
