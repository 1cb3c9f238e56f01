//! Database implementations

pub mod manager;
pub mod settings_repository;
pub mod user_repository;

pub use manager::*;
pub use settings_repository::*;
pub use user_repository::*;
