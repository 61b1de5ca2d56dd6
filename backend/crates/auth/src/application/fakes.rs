//! Per-capability test doubles

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::value_object::{
    app_secret::AppSecret, email::Email, user_password::UserPassword, AppId, UserId,
};
use crate::error::{StorageError, StorageResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    apps: HashMap<i64, App>,
}

/// Shared in-memory store; clones see the same tables
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn insert_app(&self, id: i64, name: &str, secret: &[u8]) {
        let app = App {
            id: AppId::from_raw(id),
            name: name.to_string(),
            secret: AppSecret::new(secret.to_vec()),
        };
        self.tables.lock().unwrap().apps.insert(id, app);
    }

    /// Insert a user directly, with an unusable password hash
    pub fn insert_user(&self, email: &str, is_admin: bool) -> UserId {
        let mut tables = self.tables.lock().unwrap();
        let id = UserId::from_raw(tables.users.len() as i64 + 1);
        tables.users.push(User {
            id,
            email: Email::new(email.to_string()).unwrap(),
            pass_hash: UserPassword::from_db(b"!".to_vec()).unwrap(),
            is_admin,
        });
        id
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.email.as_str() == email).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

fn check(cancel: &CancellationToken) -> StorageResult<()> {
    if cancel.is_cancelled() {
        return Err(StorageError::Cancelled);
    }
    Ok(())
}

impl UserSaver for InMemoryStore {
    async fn save_user(
        &self,
        cancel: &CancellationToken,
        email: &Email,
        pass_hash: &UserPassword,
    ) -> StorageResult<UserId> {
        check(cancel)?;
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| &u.email == email) {
            return Err(StorageError::UserExists);
        }
        let id = UserId::from_raw(tables.users.len() as i64 + 1);
        tables.users.push(User {
            id,
            email: email.clone(),
            pass_hash: pass_hash.clone(),
            is_admin: false,
        });
        Ok(id)
    }
}

impl UserProvider for InMemoryStore {
    async fn user(&self, cancel: &CancellationToken, email: &Email) -> StorageResult<User> {
        check(cancel)?;
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, cancel: &CancellationToken, user_id: UserId) -> StorageResult<bool> {
        check(cancel)?;
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

impl AppProvider for InMemoryStore {
    async fn app(&self, cancel: &CancellationToken, app_id: AppId) -> StorageResult<App> {
        check(cancel)?;
        let tables = self.tables.lock().unwrap();
        tables
            .apps
            .get(&app_id.get())
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}

/// Every call fails with an engine error
pub struct FailingStore;

fn engine_failure() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

impl UserSaver for FailingStore {
    async fn save_user(&self, _: &CancellationToken, _: &Email, _: &UserPassword) -> StorageResult<UserId> {
        Err(engine_failure())
    }
}

impl UserProvider for FailingStore {
    async fn user(&self, _: &CancellationToken, _: &Email) -> StorageResult<User> {
        Err(engine_failure())
    }

    async fn is_admin(&self, _: &CancellationToken, _: UserId) -> StorageResult<bool> {
        Err(engine_failure())
    }
}

impl AppProvider for FailingStore {
    async fn app(&self, _: &CancellationToken, _: AppId) -> StorageResult<App> {
        Err(engine_failure())
    }
}

/// Every call blocks until cancelled
pub struct PendingStore;

impl UserSaver for PendingStore {
    async fn save_user(&self, cancel: &CancellationToken, _: &Email, _: &UserPassword) -> StorageResult<UserId> {
        cancel.cancelled().await;
        Err(StorageError::Cancelled)
    }
}

impl UserProvider for PendingStore {
    async fn user(&self, cancel: &CancellationToken, _: &Email) -> StorageResult<User> {
        cancel.cancelled().await;
        Err(StorageError::Cancelled)
    }

    async fn is_admin(&self, cancel: &CancellationToken, _: UserId) -> StorageResult<bool> {
        cancel.cancelled().await;
        Err(StorageError::Cancelled)
    }
}

impl AppProvider for PendingStore {
    async fn app(&self, cancel: &CancellationToken, _: AppId) -> StorageResult<App> {
        cancel.cancelled().await;
        Err(StorageError::Cancelled)
    }
}
