//! Display-name composition and the guarded write path

pub mod composer;
pub mod context;
pub mod gate;
pub mod sanitize;
pub mod service;

pub use composer::compose;
pub use context::UpdateContext;
pub use gate::{should_apply, UpdateGate};
pub use service::DisplayNameService;
