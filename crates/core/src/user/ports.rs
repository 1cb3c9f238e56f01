//! Port interfaces for the user store
//!
//! These traits define the boundaries between the naming core and the
//! store that owns user records.

use async_trait::async_trait;
use namecast_domain::{Result, UserId, UserRecord};

use crate::naming::context::UpdateContext;

/// Trait for reading users and writing their display names
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List up to `page_size` users starting at `offset`.
    ///
    /// Ordering must be stable across calls (ascending id), otherwise a
    /// paged walk can skip or repeat users.
    async fn list_users(&self, page_size: u32, offset: u32) -> Result<Vec<UserRecord>>;

    /// Get a user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<UserRecord>>;

    /// Persist a new display name.
    ///
    /// `ctx` is handed back to any hook the write fires so re-entrant
    /// updates of the same user can be recognised.
    async fn update_display_name(&self, ctx: &UpdateContext, id: UserId, name: &str)
        -> Result<()>;

    /// Total number of users
    async fn count_users(&self) -> Result<u64>;
}
