//! Display-name field configuration

pub mod ports;
pub mod service;

pub use ports::SettingsStore;
pub use service::SettingsService;
