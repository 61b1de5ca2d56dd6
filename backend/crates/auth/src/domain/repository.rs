//! Store Capability Traits
//!
//! Three narrow capabilities instead of one repository, so a use case only
//! depends on what it calls and tests can fake each one separately. A single
//! store may implement all three.
//!
//! Every method takes the caller's cancellation token. Implementations must
//! return [`StorageError::Cancelled`](crate::error::StorageError::Cancelled)
//! once it fires and must not leave partial writes behind.

use tokio_util::sync::CancellationToken;

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::{email::Email, user_password::UserPassword, AppId, UserId};
use crate::error::StorageResult;

/// Persists new users
#[trait_variant::make(UserSaver: Send)]
pub trait LocalUserSaver {
    /// Insert a user and return the store-assigned id
    ///
    /// Fails with `UserExists` when the email is taken. Uniqueness comes
    /// from the store's constraint, not from a prior lookup.
    async fn save_user(
        &self,
        cancel: &CancellationToken,
        email: &Email,
        pass_hash: &UserPassword,
    ) -> StorageResult<UserId>;
}

/// Reads users
#[trait_variant::make(UserProvider: Send)]
pub trait LocalUserProvider {
    /// Find a user by exact email; `UserNotFound` when absent
    async fn user(&self, cancel: &CancellationToken, email: &Email) -> StorageResult<User>;

    /// Admin flag of a user; `UserNotFound` when absent
    async fn is_admin(&self, cancel: &CancellationToken, user_id: UserId) -> StorageResult<bool>;
}

/// Reads registered apps
#[trait_variant::make(AppProvider: Send)]
pub trait LocalAppProvider {
    /// Find an app by id; `AppNotFound` when absent
    async fn app(&self, cancel: &CancellationToken, app_id: AppId) -> StorageResult<App>;
}
