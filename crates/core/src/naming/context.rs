//! Update context carried through the display-name write path

use std::sync::atomic::{AtomicU64, Ordering};

use namecast_domain::UserId;

static NEXT_CHAIN: AtomicU64 = AtomicU64::new(1);

/// Identifies one call chain and marks which user, if any, it is writing.
///
/// The context is passed explicitly from the caller down through the user
/// store and back into any hook the store fires, so two concurrent requests
/// never see each other's marker. A single slot is enough: one call chain
/// only ever writes one user at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateContext {
    chain: u64,
    in_flight: Option<UserId>,
}

impl UpdateContext {
    /// Context for a new call chain that is not writing anything yet.
    pub fn root() -> Self {
        Self { chain: NEXT_CHAIN.fetch_add(1, Ordering::Relaxed), in_flight: None }
    }

    /// Child context of the same chain, marking `user_id` as being written.
    #[must_use]
    pub const fn entering(self, user_id: UserId) -> Self {
        Self { chain: self.chain, in_flight: Some(user_id) }
    }

    /// Identifier shared by a root context and all of its children.
    pub const fn chain(&self) -> u64 {
        self.chain
    }

    pub const fn in_flight(&self) -> Option<UserId> {
        self.in_flight
    }

    pub fn is_in_flight(&self, user_id: UserId) -> bool {
        self.in_flight == Some(user_id)
    }
}

impl Default for UpdateContext {
    fn default() -> Self {
        Self::root()
    }
}
