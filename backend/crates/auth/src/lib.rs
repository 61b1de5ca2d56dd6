//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store capability traits
//! - `application/` - Use cases, token minting, configuration
//! - `infra/` - SQLite store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration with email + password
//! - Login issuing an HS256 token signed with the requesting app's secret
//! - Admin flag lookup
//!
//! ## Security Model
//! - Passwords hashed with bcrypt off the async runtime
//! - Unknown email and wrong password are indistinguishable to callers
//! - App secrets and passwords are zeroized on drop and never logged

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, StorageError, StorageResult};
pub use infra::sqlite::SqliteStore;
pub use presentation::router::{sso_router, sso_router_generic};
pub use presentation::{SsoAppState, SsoStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::sqlite::SqliteStore as AuthStore;
}
