//! User store implementation using SQLite
//!
//! Besides the [`UserStore`] port the repository exposes the host-side
//! operations (registering a user, editing a profile). Every write notifies
//! the attached event sink, the way a host platform fires its user hooks.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chrono::Utc;
use namecast_core::{UpdateContext, UserEvent, UserEventSink, UserStore};
use namecast_domain::{NamecastError, NewUser, ProfileUpdate, Result as DomainResult, UserId, UserRecord};
use parking_lot::RwLock;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_join_error, map_sql_error, DbManager};

const USER_COLUMNS: &str = "id, login, email, first_name, last_name, website, display_name";

/// SQLite-backed implementation of `UserStore`
pub struct SqliteUserStore {
    db: Arc<DbManager>,
    events: RwLock<Option<Weak<dyn UserEventSink>>>,
}

impl SqliteUserStore {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db, events: RwLock::new(None) }
    }

    /// Attach the sink notified after every write.
    ///
    /// Held weakly: the sink usually owns services that hold this store.
    pub fn attach_events(&self, sink: Weak<dyn UserEventSink>) {
        *self.events.write() = Some(sink);
    }

    /// Register a user and raise the "created" hook.
    ///
    /// Returns the record as it stands after the hook ran.
    pub async fn create_user(&self, new_user: NewUser) -> DomainResult<UserRecord> {
        if new_user.login.trim().is_empty() {
            return Err(NamecastError::Validation("login must not be empty".into()));
        }

        let db = Arc::clone(&self.db);
        let id = task::spawn_blocking(move || -> DomainResult<UserId> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            let now = Utc::now().timestamp();
            let display_name =
                new_user.display_name.clone().unwrap_or_else(|| new_user.login.clone());

            tx.execute(
                "INSERT INTO users (login, email, first_name, last_name, website, display_name,
                                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    new_user.login,
                    new_user.email,
                    new_user.first_name,
                    new_user.last_name,
                    new_user.website,
                    display_name,
                    now
                ],
            )
            .map_err(map_sql_error)?;
            let id = tx.last_insert_rowid();

            replace_roles(&tx, id, &new_user.roles)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(id)
        })
        .await
        .map_err(map_join_error)??;

        debug!(user_id = id, "User created");
        self.notify(&UpdateContext::root(), UserEvent::Created(id)).await;
        self.require_user(id).await
    }

    /// Apply a profile edit and raise the "profile updated" hook.
    pub async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> DomainResult<UserRecord> {
        let mut user = self.require_user(id).await?;
        update.apply_to(&mut user);

        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            tx.execute(
                "UPDATE users
                 SET email = ?2, first_name = ?3, last_name = ?4, website = ?5,
                     display_name = ?6, updated_at = ?7
                 WHERE id = ?1",
                params![
                    user.id,
                    user.email,
                    user.first_name,
                    user.last_name,
                    user.website,
                    user.display_name,
                    Utc::now().timestamp()
                ],
            )
            .map_err(map_sql_error)?;

            if update.roles.is_some() {
                replace_roles(&tx, user.id, &user.roles)?;
            }
            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)??;

        debug!(user_id = id, "Profile updated");
        self.notify(&UpdateContext::root(), UserEvent::ProfileUpdated(id)).await;
        self.require_user(id).await
    }

    async fn require_user(&self, id: UserId) -> DomainResult<UserRecord> {
        self.get_user(id).await?.ok_or_else(|| NamecastError::NotFound(format!("user {id}")))
    }

    async fn notify(&self, ctx: &UpdateContext, event: UserEvent) {
        let sink = self.events.read().as_ref().and_then(Weak::upgrade);
        if let Some(sink) = sink {
            let outcome = sink.notify(ctx, event).await;
            debug!(user_id = event.user_id(), event = event.label(), ?outcome, "User hook ran");
        }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn list_users(&self, page_size: u32, offset: u32) -> DomainResult<Vec<UserRecord>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<UserRecord>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT ?1 OFFSET ?2"
                ))
                .map_err(map_sql_error)?;

            let mut users = stmt
                .query_map(params![page_size, offset], map_user_row)
                .map_err(map_sql_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_sql_error)?;

            for user in &mut users {
                user.roles = load_roles(&conn, user.id)?;
            }
            Ok(users)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_user(&self, id: UserId) -> DomainResult<Option<UserRecord>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<UserRecord>> {
            let conn = db.get_connection()?;
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id],
                    map_user_row,
                )
                .optional()
                .map_err(map_sql_error)?;

            match user {
                Some(mut user) => {
                    user.roles = load_roles(&conn, user.id)?;
                    Ok(Some(user))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_display_name(
        &self,
        ctx: &UpdateContext,
        id: UserId,
        name: &str,
    ) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let name = name.to_string();

        let changed = task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE users SET display_name = ?2, updated_at = ?3 WHERE id = ?1",
                params![id, name, Utc::now().timestamp()],
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)??;

        if changed == 0 {
            return Err(NamecastError::NotFound(format!("user {id}")));
        }

        self.notify(ctx, UserEvent::ProfileUpdated(id)).await;
        Ok(())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
                .map_err(map_sql_error)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        login: row.get(1)?,
        email: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        website: row.get(5)?,
        roles: Vec::new(),
        display_name: row.get(6)?,
    })
}

fn load_roles(conn: &Connection, user_id: UserId) -> DomainResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT role FROM user_roles WHERE user_id = ?1 ORDER BY position ASC")
        .map_err(map_sql_error)?;

    let roles = stmt
        .query_map(params![user_id], |row| row.get(0))
        .map_err(map_sql_error)?
        .collect::<Result<Vec<String>, _>>()
        .map_err(map_sql_error)?;
    Ok(roles)
}

fn replace_roles(conn: &Connection, user_id: UserId, roles: &[String]) -> DomainResult<()> {
    conn.execute("DELETE FROM user_roles WHERE user_id = ?1", params![user_id])
        .map_err(map_sql_error)?;

    for (position, role) in roles.iter().enumerate() {
        let position = i64::try_from(position).unwrap_or(i64::MAX);
        conn.execute(
            "INSERT INTO user_roles (user_id, position, role) VALUES (?1, ?2, ?3)",
            params![user_id, position, role],
        )
        .map_err(map_sql_error)?;
    }
    Ok(())
}
