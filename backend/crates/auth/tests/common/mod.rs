//! Shared fixtures for store and HTTP tests

#![allow(dead_code)]

use auth::SqliteStore;
use auth::models::UserId;
use tempfile::TempDir;

pub const APP_ID: i64 = 1;
pub const APP_SECRET: &[u8] = b"test-secret";

/// Migrated store in a temporary directory; the file goes away on drop
pub struct TestDb {
    pub store: SqliteStore,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::connect(dir.path().join("sso.db")).await.unwrap();
    store.migrate().await.unwrap();

    insert_app(&store, APP_ID, "test", APP_SECRET).await;

    TestDb { store, _dir: dir }
}

/// Apps are provisioned outside the service
pub async fn insert_app(store: &SqliteStore, id: i64, name: &str, secret: &[u8]) {
    sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(secret)
        .execute(store.pool())
        .await
        .unwrap();
}

/// Admin flags are provisioned outside the service
pub async fn grant_admin(store: &SqliteStore, user_id: UserId) {
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = ?")
        .bind(user_id.get())
        .execute(store.pool())
        .await
        .unwrap();
}

pub async fn user_count(store: &SqliteStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(store.pool())
        .await
        .unwrap()
}
