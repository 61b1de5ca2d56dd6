//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod hashing;
pub mod is_admin;
pub mod login;
pub mod register;
pub mod token;

#[cfg(test)]
pub(crate) mod fakes;

// Re-exports
pub use config::AuthConfig;
pub use is_admin::IsAdminUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{TokenClaims, mint_token, verify_token};
