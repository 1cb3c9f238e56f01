//! User store access
//!
//! This module provides the port the naming core uses to read user records
//! and persist display names.

pub mod ports;

pub use ports::UserStore;
