//! SSO Router

use axum::{Router, routing::post};

use crate::infra::sqlite::SqliteStore;
use crate::presentation::handlers::{self, SsoAppState, SsoStore};

/// Create the SSO router backed by SQLite
pub fn sso_router(state: SsoAppState<SqliteStore>) -> Router {
    sso_router_generic(state)
}

/// Create the SSO router for any store implementation
pub fn sso_router_generic<R: SsoStore>(state: SsoAppState<R>) -> Router {
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/is-admin", post(handlers::is_admin::<R>))
        .with_state(state)
}
