//! Display-name service - composes and applies names for single users

use std::sync::Arc;

use namecast_domain::{FieldSelection, NamecastError, Result, UserId, UserRecord};
use tracing::{debug, instrument};

use super::composer::compose;
use super::context::UpdateContext;
use super::gate::{should_apply, UpdateGate};
use crate::settings::SettingsService;
use crate::user::UserStore;

/// Display-name service
pub struct DisplayNameService {
    users: Arc<dyn UserStore>,
    settings: Arc<SettingsService>,
    gate: Arc<UpdateGate>,
}

impl DisplayNameService {
    pub fn new(
        users: Arc<dyn UserStore>,
        settings: Arc<SettingsService>,
        gate: Arc<UpdateGate>,
    ) -> Self {
        Self { users, settings, gate }
    }

    pub fn gate(&self) -> &Arc<UpdateGate> {
        &self.gate
    }

    /// Current field selection
    pub async fn selection(&self) -> Result<FieldSelection> {
        self.settings.load().await
    }

    /// Compose and, if warranted, write the display name for one record.
    ///
    /// Returns whether a write happened. Write failures are absorbed by the
    /// gate and reported as `false`.
    pub async fn apply_to_record(
        &self,
        ctx: &UpdateContext,
        user: &UserRecord,
        selection: &FieldSelection,
        force: bool,
    ) -> bool {
        let name = compose(user, selection);
        if !should_apply(&user.display_name, &name, force) {
            return false;
        }
        self.gate.apply(ctx, user.id, &name).await
    }

    /// Recompute the display name of `user_id` with the stored selection.
    #[instrument(skip(self, ctx), fields(in_flight = ?ctx.in_flight()))]
    pub async fn refresh_user(&self, ctx: &UpdateContext, user_id: UserId, force: bool) -> Result<bool> {
        let selection = self.selection().await?;
        if selection.is_empty() {
            debug!("No display-name fields selected; leaving user untouched");
            return Ok(false);
        }

        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| NamecastError::NotFound(format!("user {user_id}")))?;

        Ok(self.apply_to_record(ctx, &user, &selection, force).await)
    }

    /// Hook for newly created users; always writes a non-empty name.
    pub async fn on_user_created(&self, ctx: &UpdateContext, user_id: UserId) -> Result<bool> {
        self.refresh_user(ctx, user_id, true).await
    }

    /// Hook for profile edits; writes only when the name changed.
    ///
    /// Events raised by this service's own write for the same user are
    /// ignored.
    pub async fn on_profile_updated(&self, ctx: &UpdateContext, user_id: UserId) -> Result<bool> {
        if ctx.is_in_flight(user_id) {
            debug!(user_id, "Ignoring profile update raised by our own write");
            return Ok(false);
        }
        self.refresh_user(ctx, user_id, false).await
    }
}
