//! Routes user lifecycle events to the display-name service

use std::sync::Arc;

use async_trait::async_trait;
use namecast_domain::UserId;
use tracing::{debug, error};

use super::suppression::HookSuppression;
use crate::naming::{DisplayNameService, UpdateContext};

/// Lifecycle event raised by the user store after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    Created(UserId),
    ProfileUpdated(UserId),
}

impl UserEvent {
    pub fn user_id(&self) -> UserId {
        match self {
            Self::Created(id) | Self::ProfileUpdated(id) => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "user_created",
            Self::ProfileUpdated(_) => "profile_updated",
        }
    }
}

/// Receiver of user lifecycle events.
///
/// `ctx` is the context of the write that raised the event.
#[async_trait]
pub trait UserEventSink: Send + Sync {
    async fn notify(&self, ctx: &UpdateContext, event: UserEvent) -> HookOutcome;
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The display name was written.
    Applied,
    /// The handler ran but nothing needed writing.
    Unchanged,
    /// The event was ignored because of suppression or re-entrancy.
    Skipped,
    /// The handler failed; the error was logged.
    Failed,
}

/// Dispatches lifecycle events to [`DisplayNameService`].
pub struct HookDispatcher {
    service: Arc<DisplayNameService>,
    suppression: Arc<HookSuppression>,
}

impl HookDispatcher {
    pub fn new(service: Arc<DisplayNameService>, suppression: Arc<HookSuppression>) -> Self {
        Self { service, suppression }
    }

    pub async fn dispatch(&self, ctx: &UpdateContext, event: UserEvent) -> HookOutcome {
        let user_id = event.user_id();

        let result = match event {
            UserEvent::Created(_) => self.service.on_user_created(ctx, user_id).await,
            UserEvent::ProfileUpdated(_) => {
                if self.suppression.is_suppressed(ctx, user_id) || ctx.is_in_flight(user_id) {
                    debug!(user_id, "Profile-updated hook suppressed");
                    return HookOutcome::Skipped;
                }
                self.service.on_profile_updated(ctx, user_id).await
            }
        };

        match result {
            Ok(true) => HookOutcome::Applied,
            Ok(false) => HookOutcome::Unchanged,
            Err(err) => {
                error!(user_id, event = event.label(), error = %err, "Display-name hook failed");
                HookOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl UserEventSink for HookDispatcher {
    async fn notify(&self, ctx: &UpdateContext, event: UserEvent) -> HookOutcome {
        self.dispatch(ctx, event).await
    }
}
