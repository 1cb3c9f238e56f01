use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;

use async_trait::async_trait;
use namecast_core::{HookOutcome, UpdateContext, UserEvent, UserEventSink, UserStore};
use namecast_domain::{NamecastError, Result as DomainResult, UserId, UserRecord};
use parking_lot::{Mutex, RwLock};

/// In-memory mock for `UserStore`.
///
/// Users are kept ordered by id. Every successful display-name write raises
/// a profile-updated event on the attached sink, the way the SQLite store
/// does, so re-entrancy can be observed. Page fetches, writes and hook
/// outcomes are recorded for assertions.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<BTreeMap<UserId, UserRecord>>,
    sink: RwLock<Option<Weak<dyn UserEventSink>>>,
    failing_writes: Mutex<HashSet<UserId>>,
    fail_listing: AtomicBool,
    page_fetches: Mutex<Vec<(u32, u32)>>,
    writes: Mutex<Vec<(UserId, String)>>,
    write_contexts: Mutex<Vec<UpdateContext>>,
    hook_outcomes: Mutex<Vec<HookOutcome>>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        let store = Self::default();
        store.users.lock().extend(users.into_iter().map(|user| (user.id, user)));
        store
    }

    pub fn attach_events(&self, sink: Weak<dyn UserEventSink>) {
        *self.sink.write() = Some(sink);
    }

    /// Make every write for `user_id` fail.
    pub fn fail_writes_for(&self, user_id: UserId) {
        self.failing_writes.lock().insert(user_id);
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Edit a user outside the display-name path and raise the hook, as the
    /// host would on a profile save.
    pub async fn edit_profile(&self, user_id: UserId, edit: impl FnOnce(&mut UserRecord)) {
        if let Some(user) = self.users.lock().get_mut(&user_id) {
            edit(user);
        }
        self.raise(&UpdateContext::root(), UserEvent::ProfileUpdated(user_id)).await;
    }

    pub fn display_name(&self, user_id: UserId) -> Option<String> {
        self.users.lock().get(&user_id).map(|user| user.display_name.clone())
    }

    /// `(page_size, offset)` of every page fetched so far.
    pub fn page_fetches(&self) -> Vec<(u32, u32)> {
        self.page_fetches.lock().clone()
    }

    pub fn writes(&self) -> Vec<(UserId, String)> {
        self.writes.lock().clone()
    }

    pub fn write_contexts(&self) -> Vec<UpdateContext> {
        self.write_contexts.lock().clone()
    }

    pub fn hook_outcomes(&self) -> Vec<HookOutcome> {
        self.hook_outcomes.lock().clone()
    }

    async fn raise(&self, ctx: &UpdateContext, event: UserEvent) {
        let sink = self.sink.read().as_ref().and_then(Weak::upgrade);
        if let Some(sink) = sink {
            let outcome = sink.notify(ctx, event).await;
            self.hook_outcomes.lock().push(outcome);
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self, page_size: u32, offset: u32) -> DomainResult<Vec<UserRecord>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(NamecastError::Store("connection reset".into()));
        }
        self.page_fetches.lock().push((page_size, offset));

        Ok(self
            .users
            .lock()
            .values()
            .skip(offset as usize)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: UserId) -> DomainResult<Option<UserRecord>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn update_display_name(
        &self,
        ctx: &UpdateContext,
        id: UserId,
        name: &str,
    ) -> DomainResult<()> {
        self.write_contexts.lock().push(*ctx);

        if self.failing_writes.lock().contains(&id) {
            return Err(NamecastError::Store(format!("write rejected for user {id}")));
        }

        {
            let mut users = self.users.lock();
            let user = users
                .get_mut(&id)
                .ok_or_else(|| NamecastError::NotFound(format!("user {id}")))?;
            user.display_name = name.to_string();
        }
        self.writes.lock().push((id, name.to_string()));

        self.raise(ctx, UserEvent::ProfileUpdated(id)).await;
        Ok(())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(self.users.lock().len() as u64)
    }
}
