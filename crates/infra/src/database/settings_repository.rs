//! Settings store implementation using SQLite
//!
//! Values are stored as JSON text keyed by name. The field selection is a
//! JSON array of field tokens.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use namecast_core::SettingsStore;
use namecast_domain::{FieldSelection, NamecastError, Result as DomainResult};
use rusqlite::{params, OptionalExtension};
use tokio::task;
use tracing::warn;

use super::manager::{map_join_error, map_sql_error, DbManager};
use crate::errors::InfraError;

/// SQLite-backed implementation of `SettingsStore`
pub struct SqliteSettingsStore {
    db: Arc<DbManager>,
}

impl SqliteSettingsStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn load_selection(
        &self,
        key: &str,
        default: FieldSelection,
    ) -> DomainResult<FieldSelection> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        let stored = task::spawn_blocking(move || -> DomainResult<Option<String>> {
            let conn = db.get_connection()?;
            conn.query_row("SELECT value_json FROM settings WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)??;

        let Some(json) = stored else {
            return Ok(default);
        };

        // Parse as raw tokens so a hand-edited value with an unknown entry
        // degrades to the valid subset instead of failing every run.
        let tokens: Vec<String> =
            serde_json::from_str(&json).map_err(|err| NamecastError::from(InfraError::from(err)))?;
        let filter = FieldSelection::from_tokens(&tokens);
        if !filter.rejected.is_empty() {
            warn!(rejected = ?filter.rejected, "Ignoring invalid stored field tokens");
        }
        Ok(filter.selection)
    }

    async fn save_selection(&self, key: &str, selection: &FieldSelection) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();
        let json = serde_json::to_string(selection)
            .map_err(|err| NamecastError::from(InfraError::from(err)))?;

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO settings (key, value_json, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json,
                                                updated_at = excluded.updated_at",
                params![key, json, Utc::now().timestamp()],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
