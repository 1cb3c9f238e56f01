//! User lifecycle hooks

pub mod dispatcher;
pub mod suppression;

pub use dispatcher::{HookDispatcher, HookOutcome, UserEvent, UserEventSink};
pub use suppression::{HookSuppression, SuppressionGuard};
