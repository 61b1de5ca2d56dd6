//! Register Use Case
//!
//! Creates a new user account from an email and a clear-text password.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::config::AuthConfig;
use crate::application::hashing;
use crate::domain::repository::UserSaver;
use crate::domain::value_object::{email::Email, user_password::RawPassword, UserId};
use crate::error::{AuthError, AuthResult, StorageError};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: UserSaver,
{
    saver: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> RegisterUseCase<S>
where
    S: UserSaver,
{
    pub fn new(saver: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { saver, config }
    }

    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        input: RegisterInput,
    ) -> AuthResult<UserId> {
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        let pass_hash =
            hashing::hash_password(cancel, password, self.config.password_cost).await?;

        // No existence pre-check: the unique constraint decides
        match self.saver.save_user(cancel, &email, &pass_hash).await {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, email = %email, "User registered");
                Ok(user_id)
            }
            Err(StorageError::UserExists) => {
                tracing::warn!(email = %email, "Registration for an existing email");
                Err(AuthError::UserExists)
            }
            Err(e) => Err(AuthError::from_storage("save user", e)),
        }
    }
}
