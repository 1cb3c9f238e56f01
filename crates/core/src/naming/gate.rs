//! Update gate: decides whether a computed name is written, and writes it
//! without letting the write re-trigger itself.

use std::sync::Arc;

use namecast_domain::UserId;
use tracing::{debug, warn};

use super::context::UpdateContext;
use crate::hooks::HookSuppression;
use crate::user::UserStore;

/// Whether `computed` should replace `current`.
///
/// An empty computed name is never written. Otherwise a forced update always
/// writes and an unforced one writes only when the name changed.
pub fn should_apply(current: &str, computed: &str, force: bool) -> bool {
    !computed.is_empty() && (force || computed != current)
}

/// Writes display names through the user store.
pub struct UpdateGate {
    users: Arc<dyn UserStore>,
    suppression: Arc<HookSuppression>,
}

impl UpdateGate {
    pub fn new(users: Arc<dyn UserStore>, suppression: Arc<HookSuppression>) -> Self {
        Self { users, suppression }
    }

    /// Write `name` for `user_id`, returning whether the write happened.
    ///
    /// A request for a user already in flight on `ctx` is dropped. Store
    /// failures are logged and reported as `false`.
    pub async fn apply(&self, ctx: &UpdateContext, user_id: UserId, name: &str) -> bool {
        if ctx.is_in_flight(user_id) {
            debug!(user_id, "Display-name update already in flight; dropping nested request");
            return false;
        }

        let child = ctx.entering(user_id);
        let _guard = self.suppression.suppress(&child, user_id);

        match self.users.update_display_name(&child, user_id, name).await {
            Ok(()) => {
                debug!(user_id, display_name = name, "Display name updated");
                true
            }
            Err(err) => {
                warn!(user_id, error = %err, "Failed to update display name");
                false
            }
        }
    }
}
