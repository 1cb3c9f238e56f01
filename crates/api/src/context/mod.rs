//! Application context - dependency injection container

use std::sync::Arc;

use async_trait::async_trait;
use namecast_core::{
    BatchDriver, BatchTransport, DisplayNameService, HookDispatcher, HookSuppression,
    SettingsService, UpdateGate, UserEventSink, UserStore,
};
use namecast_domain::{BatchResult, Config, Result, UserCount};
use namecast_infra::{DbManager, SqliteSettingsStore, SqliteUserStore};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub users: Arc<SqliteUserStore>,
    pub settings: Arc<SettingsService>,
    pub suppression: Arc<HookSuppression>,
    pub names: Arc<DisplayNameService>,
    pub dispatcher: Arc<HookDispatcher>,
    pub driver: Arc<BatchDriver>,
}

impl AppContext {
    /// Open the configured database, run migrations and wire services.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        Ok(Self::with_db(config, db))
    }

    /// Wire services over an already migrated database.
    pub fn with_db(config: Config, db: Arc<DbManager>) -> Self {
        let users = Arc::new(SqliteUserStore::new(Arc::clone(&db)));
        let settings =
            Arc::new(SettingsService::new(Arc::new(SqliteSettingsStore::new(Arc::clone(&db)))));

        let suppression = HookSuppression::new();
        let gate = Arc::new(UpdateGate::new(users.clone(), suppression.clone()));
        let names = Arc::new(DisplayNameService::new(users.clone(), settings.clone(), gate));
        let dispatcher = Arc::new(HookDispatcher::new(names.clone(), suppression.clone()));

        // The store only holds the dispatcher weakly; the context keeps it alive.
        let sink: Arc<dyn UserEventSink> = dispatcher.clone();
        users.attach_events(Arc::downgrade(&sink));

        let driver = Arc::new(
            BatchDriver::new(users.clone(), names.clone()).with_page_size(config.batch.page_size),
        );

        info!(
            db_path = %db.path().display(),
            page_size = driver.page_size(),
            "application context initialised"
        );

        Self { config, db, users, settings, suppression, names, dispatcher, driver }
    }

    /// Transport that drives the batch loop in-process, without HTTP.
    pub fn local_transport(&self) -> LocalBatchTransport {
        LocalBatchTransport { driver: Arc::clone(&self.driver), users: self.users.clone() }
    }
}

/// Batch transport calling the driver directly.
pub struct LocalBatchTransport {
    driver: Arc<BatchDriver>,
    users: Arc<dyn UserStore>,
}

#[async_trait]
impl BatchTransport for LocalBatchTransport {
    async fn user_count(&self) -> Result<UserCount> {
        let total = self.users.count_users().await?;
        Ok(UserCount { total, page_size: self.driver.page_size() })
    }

    async fn process_page(&self, offset: u32) -> Result<BatchResult> {
        self.driver.run_page(offset).await
    }
}
