//! Login Use Case
//!
//! Verifies credentials and issues a token signed for the requested app.
//!
//! Error precedence is fixed: user lookup, then password, then app. An
//! unknown email and a wrong password both end as `InvalidCredentials`; only
//! the logs tell them apart.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::config::AuthConfig;
use crate::application::{hashing, token};
use crate::domain::repository::{AppProvider, UserProvider};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    AppId,
};
use crate::error::{AuthError, AuthResult, StorageError};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub app_id: AppId,
}

/// Login use case
pub struct LoginUseCase<U, A>
where
    U: UserProvider,
    A: AppProvider,
{
    users: Arc<U>,
    apps: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<U, A> LoginUseCase<U, A>
where
    U: UserProvider,
    A: AppProvider,
{
    pub fn new(users: Arc<U>, apps: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            apps,
            config,
        }
    }

    /// Returns the signed token
    pub async fn execute(&self, cancel: &CancellationToken, input: LoginInput) -> AuthResult<String> {
        // Empty email or password can never match a stored account
        let (Ok(email), Ok(password)) = (Email::new(input.email), RawPassword::new(input.password))
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = match self.users.user(cancel, &email).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!(email = %email, "Login for unknown email");
                self.spend_verify_time(cancel, password).await?;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::from_storage("get user", e)),
        };

        if !hashing::verify_password(cancel, user.pass_hash.clone(), password).await? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.apps.app(cancel, input.app_id).await {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                tracing::warn!(user_id = %user.id, app_id = %input.app_id, "Login for unknown app");
                return Err(AuthError::InvalidAppId);
            }
            Err(e) => return Err(AuthError::from_storage("get app", e)),
        };

        let token = token::mint_token(&user, &app, self.config.token_ttl)
            .map_err(|e| AuthError::internal("mint token", e))?;

        if cancel.is_cancelled() {
            return Err(AuthError::Cancelled);
        }

        tracing::info!(user_id = %user.id, app_id = %app.id, "User logged in");

        Ok(token)
    }

    /// Run one bcrypt verification against a placeholder so an unknown email
    /// takes as long as a wrong password. Only cancellation is reported.
    async fn spend_verify_time(
        &self,
        cancel: &CancellationToken,
        password: RawPassword,
    ) -> AuthResult<()> {
        let placeholder = UserPassword::placeholder(self.config.password_cost);

        match hashing::verify_password(cancel, placeholder, password).await {
            Err(AuthError::Cancelled) => Err(AuthError::Cancelled),
            _ => Ok(()),
        }
    }
}
