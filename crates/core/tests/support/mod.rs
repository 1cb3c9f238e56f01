//! Shared test helpers for `namecast-core` integration tests.
//!
//! In-memory stand-ins for the store ports plus a small harness that wires
//! the display-name service, dispatcher and driver together the same way the
//! application context does.

#![allow(dead_code)]

pub mod settings;
pub mod transport;
pub mod users;

use std::sync::Arc;

use namecast_core::{
    BatchDriver, DisplayNameService, HookDispatcher, HookSuppression, SettingsService,
    UpdateGate, UserEventSink,
};
use namecast_domain::{FieldSelection, UserId, UserRecord};

pub use settings::InMemorySettingsStore;
pub use transport::{DriverTransport, RecordingObserver, ScriptedTransport};
pub use users::InMemoryUserStore;

/// A user whose current display name is their login.
pub fn seeded_user(id: UserId) -> UserRecord {
    UserRecord {
        id,
        login: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        website: String::new(),
        roles: vec!["subscriber".into()],
        display_name: format!("user{id}"),
    }
}

pub fn seeded_users(count: i64) -> Vec<UserRecord> {
    (1..=count).map(seeded_user).collect()
}

/// Fully wired core services over in-memory stores.
pub struct Harness {
    pub users: Arc<InMemoryUserStore>,
    pub settings_store: Arc<InMemorySettingsStore>,
    pub settings: Arc<SettingsService>,
    pub suppression: Arc<HookSuppression>,
    pub service: Arc<DisplayNameService>,
    pub dispatcher: Arc<HookDispatcher>,
}

impl Harness {
    pub fn new(users: Vec<UserRecord>, selection: FieldSelection) -> Self {
        let users = Arc::new(InMemoryUserStore::new(users));
        let settings_store = Arc::new(InMemorySettingsStore::with_selection(selection));
        let settings = Arc::new(SettingsService::new(settings_store.clone()));
        let suppression = HookSuppression::new();
        let gate = Arc::new(UpdateGate::new(users.clone(), suppression.clone()));
        let service = Arc::new(DisplayNameService::new(users.clone(), settings.clone(), gate));
        let dispatcher = Arc::new(HookDispatcher::new(service.clone(), suppression.clone()));

        let sink: Arc<dyn UserEventSink> = dispatcher.clone();
        users.attach_events(Arc::downgrade(&sink));

        Self { users, settings_store, settings, suppression, service, dispatcher }
    }

    pub fn driver(&self) -> BatchDriver {
        BatchDriver::new(self.users.clone(), self.service.clone())
    }
}
