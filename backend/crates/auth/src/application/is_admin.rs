//! Is Admin Use Case

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::repository::UserProvider;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult, StorageError};

/// Is admin use case
pub struct IsAdminUseCase<U>
where
    U: UserProvider,
{
    users: Arc<U>,
}

impl<U> IsAdminUseCase<U>
where
    U: UserProvider,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, cancel: &CancellationToken, user_id: UserId) -> AuthResult<bool> {
        match self.users.is_admin(cancel, user_id).await {
            Ok(is_admin) => {
                tracing::debug!(user_id = %user_id, is_admin, "Checked admin flag");
                Ok(is_admin)
            }
            // Unknown subject is reported as InvalidAppId; existing clients match on it
            Err(StorageError::UserNotFound) => {
                tracing::warn!(user_id = %user_id, "Admin check for unknown user");
                Err(AuthError::InvalidAppId)
            }
            Err(e) => Err(AuthError::from_storage("check admin", e)),
        }
    }
}
