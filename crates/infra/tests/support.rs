#![allow(dead_code)]

use std::sync::Arc;

use namecast_core::{
    BatchDriver, DisplayNameService, HookDispatcher, HookSuppression, SettingsService,
    UpdateGate, UserEventSink,
};
use namecast_infra::database::{DbManager, SqliteSettingsStore, SqliteUserStore};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new migrated temporary database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// SQLite stores wired to the core services with hooks attached.
pub struct Wired {
    pub db: TestDatabase,
    pub users: Arc<SqliteUserStore>,
    pub settings: Arc<SettingsService>,
    pub service: Arc<DisplayNameService>,
    pub dispatcher: Arc<HookDispatcher>,
    pub suppression: Arc<HookSuppression>,
}

impl Wired {
    pub fn new() -> Self {
        let db = TestDatabase::new();
        let users = Arc::new(SqliteUserStore::new(Arc::clone(&db.manager)));
        let settings = Arc::new(SettingsService::new(Arc::new(SqliteSettingsStore::new(
            Arc::clone(&db.manager),
        ))));
        let suppression = HookSuppression::new();
        let gate = Arc::new(UpdateGate::new(users.clone(), suppression.clone()));
        let service = Arc::new(DisplayNameService::new(users.clone(), settings.clone(), gate));
        let dispatcher = Arc::new(HookDispatcher::new(service.clone(), suppression.clone()));

        let sink: Arc<dyn UserEventSink> = dispatcher.clone();
        users.attach_events(Arc::downgrade(&sink));

        Self { db, users, settings, service, dispatcher, suppression }
    }

    pub fn driver(&self) -> BatchDriver {
        BatchDriver::new(self.users.clone(), self.service.clone())
    }
}
