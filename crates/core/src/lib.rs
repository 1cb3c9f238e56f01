//! # Namecast Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Display-name composition and the guarded write path
//! - Port interfaces for the user and settings stores
//! - The batch driver and the client-side progress loop
//!
//! ## Architecture Principles
//! - Only depends on `namecast-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod batch;
pub mod hooks;
pub mod naming;
pub mod settings;
pub mod user;

pub use batch::{
    BatchDriver, BatchTransport, NoopObserver, ProgressObserver, ProgressReporter, ReporterError,
    RunOutcome,
};
pub use hooks::{HookDispatcher, HookOutcome, HookSuppression, UserEvent, UserEventSink};
pub use naming::{compose, should_apply, DisplayNameService, UpdateContext, UpdateGate};
pub use settings::{SettingsService, SettingsStore};
pub use user::UserStore;
