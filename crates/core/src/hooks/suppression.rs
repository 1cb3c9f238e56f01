//! Scoped suppression of the profile-updated hook
//!
//! While the update gate writes a display name, the store may fire a
//! "profile updated" event for the same user. The gate holds a
//! [`SuppressionGuard`] for the duration of the write; the dispatcher checks
//! [`HookSuppression::is_suppressed`] and drops the event. Dropping the guard
//! lifts the suppression on every exit path, unwinding included.
//!
//! Scopes are keyed by call chain and user, so a write in one request never
//! silences a profile edit for the same user arriving on another.

use std::collections::HashMap;
use std::sync::Arc;

use namecast_domain::UserId;
use parking_lot::Mutex;

use crate::naming::UpdateContext;

type ScopeKey = (u64, UserId);

/// Registry of (call chain, user) pairs whose profile-updated hook is
/// currently suppressed.
#[derive(Debug, Default)]
pub struct HookSuppression {
    // Counts allow nested scopes for the same key.
    active: Mutex<HashMap<ScopeKey, usize>>,
}

impl HookSuppression {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Suppress the hook for `user_id` within `ctx`'s call chain until the
    /// returned guard is dropped.
    #[must_use = "suppression ends as soon as the guard is dropped"]
    pub fn suppress(self: &Arc<Self>, ctx: &UpdateContext, user_id: UserId) -> SuppressionGuard {
        let key = (ctx.chain(), user_id);
        *self.active.lock().entry(key).or_insert(0) += 1;
        SuppressionGuard { registry: Arc::clone(self), key }
    }

    pub fn is_suppressed(&self, ctx: &UpdateContext, user_id: UserId) -> bool {
        self.active.lock().contains_key(&(ctx.chain(), user_id))
    }

    /// Number of active suppression scopes.
    pub fn active_count(&self) -> usize {
        self.active.lock().len()
    }

    fn release(&self, key: ScopeKey) {
        let mut active = self.active.lock();
        if let Some(count) = active.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                active.remove(&key);
            }
        }
    }
}

/// RAII scope returned by [`HookSuppression::suppress`].
#[derive(Debug)]
pub struct SuppressionGuard {
    registry: Arc<HookSuppression>,
    key: ScopeKey,
}

impl SuppressionGuard {
    pub fn user_id(&self) -> UserId {
        self.key.1
    }
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.registry.release(self.key);
    }
}
