//! SQLite Store
//!
//! Implements all three capability traits over one `SqlitePool`. Queries are
//! parameterised and go through sqlx's per-connection statement cache.
//!
//! Each call races the caller's cancellation token. Losing the race drops
//! the query future; for `save_user` that drops the open transaction, which
//! rolls it back.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tokio_util::sync::CancellationToken;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::value_object::{
    app_secret::AppSecret, email::Email, user_password::UserPassword, AppId, UserId,
};
use crate::error::{StorageError, StorageResult};

/// Embedded schema migrations
static MIGRATOR: Migrator = sqlx::migrate!("../../database/migrations");

/// SQLite-backed user and app store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file at `storage_path`
    pub async fn connect(storage_path: impl AsRef<Path>) -> Result<Self, sqlx::Error> {
        let storage_path = storage_path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(storage_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        tracing::info!(path = %storage_path.display(), "Opened SQLite store");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply pending migrations; returns how many were applied
    pub async fn migrate(&self) -> Result<usize, MigrateError> {
        let pending = {
            let mut conn = self.pool.acquire().await?;
            conn.ensure_migrations_table().await?;
            let applied = conn.list_applied_migrations().await?;

            MIGRATOR
                .iter()
                .filter(|m| !m.migration_type.is_down_migration())
                .filter(|m| !applied.iter().any(|a| a.version == m.version))
                .count()
        };

        MIGRATOR.run(&self.pool).await?;

        if pending > 0 {
            tracing::info!(applied = pending, "Applied schema migrations");
        } else {
            tracing::debug!("Schema up to date");
        }

        Ok(pending)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    cancel
        .run_until_cancelled(fut)
        .await
        .unwrap_or(Err(StorageError::Cancelled))
}

// ============================================================================
// Rows
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: Vec<u8>,
    is_admin: bool,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let pass_hash = UserPassword::from_db(row.password_hash)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        Ok(User {
            id: UserId::from_raw(row.id),
            email,
            pass_hash,
            is_admin: row.is_admin,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: Vec<u8>,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        App {
            id: AppId::from_raw(row.id),
            name: row.name,
            secret: AppSecret::new(row.secret),
        }
    }
}

// ============================================================================
// Capability Implementations
// ============================================================================

impl UserSaver for SqliteStore {
    async fn save_user(
        &self,
        cancel: &CancellationToken,
        email: &Email,
        pass_hash: &UserPassword,
    ) -> StorageResult<UserId> {
        cancellable(cancel, async {
            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
                .bind(email.as_str())
                .bind(pass_hash.as_bytes())
                .execute(&mut *tx)
                .await;

            let id = match inserted {
                Ok(done) => done.last_insert_rowid(),
                Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                    return Err(StorageError::UserExists);
                }
                Err(e) => return Err(e.into()),
            };

            tx.commit().await?;

            Ok(UserId::from_raw(id))
        })
        .await
    }
}

impl UserProvider for SqliteStore {
    async fn user(&self, cancel: &CancellationToken, email: &Email) -> StorageResult<User> {
        cancellable(cancel, async {
            let row = sqlx::query_as::<_, UserRow>(
                "SELECT id, email, password_hash, is_admin FROM users WHERE email = ?",
            )
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::UserNotFound)?;

            User::try_from(row)
        })
        .await
    }

    async fn is_admin(&self, cancel: &CancellationToken, user_id: UserId) -> StorageResult<bool> {
        cancellable(cancel, async {
            sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?")
                .bind(user_id.get())
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StorageError::UserNotFound)
        })
        .await
    }
}

impl AppProvider for SqliteStore {
    async fn app(&self, cancel: &CancellationToken, app_id: AppId) -> StorageResult<App> {
        cancellable(cancel, async {
            sqlx::query_as::<_, AppRow>("SELECT id, name, secret FROM apps WHERE id = ?")
                .bind(app_id.get())
                .fetch_optional(&self.pool)
                .await?
                .map(App::from)
                .ok_or(StorageError::AppNotFound)
        })
        .await
    }
}
