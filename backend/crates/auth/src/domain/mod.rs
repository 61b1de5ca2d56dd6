//! Domain Layer
//!
//! Contains entities, value objects, and the store capability traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{app::App, user::User};
pub use repository::{AppProvider, UserProvider, UserSaver};
