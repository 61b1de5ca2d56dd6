//! bcrypt on the blocking pool
//!
//! Hashing and verification take tens to hundreds of milliseconds, so they
//! run on `spawn_blocking` and are raced against the caller's cancellation
//! token. A cancelled call returns immediately; the blocking task finishes in
//! the background and its result is dropped.

use platform::password::BcryptCost;
use tokio_util::sync::CancellationToken;

use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash a password for storage
pub async fn hash_password(
    cancel: &CancellationToken,
    password: RawPassword,
    cost: BcryptCost,
) -> AuthResult<UserPassword> {
    let task = tokio::task::spawn_blocking(move || UserPassword::from_raw(&password, cost));

    match cancel.run_until_cancelled(task).await {
        None => Err(AuthError::Cancelled),
        Some(Err(join)) => Err(AuthError::internal("hash password", join)),
        Some(Ok(Err(e))) => Err(AuthError::internal("hash password", e)),
        Some(Ok(Ok(hash))) => Ok(hash),
    }
}

/// Compare a password with a stored hash
///
/// `Ok(false)` is a mismatch. An unparsable stored hash is `Internal`.
pub async fn verify_password(
    cancel: &CancellationToken,
    pass_hash: UserPassword,
    password: RawPassword,
) -> AuthResult<bool> {
    let task = tokio::task::spawn_blocking(move || pass_hash.verify(&password));

    match cancel.run_until_cancelled(task).await {
        None => Err(AuthError::Cancelled),
        Some(Err(join)) => Err(AuthError::internal("verify password", join)),
        Some(Ok(Err(e))) => Err(AuthError::internal("verify password", e)),
        Some(Ok(Ok(matches))) => Ok(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> RawPassword {
        RawPassword::new(s.to_string()).unwrap()
    }

    fn cost() -> BcryptCost {
        BcryptCost::new(BcryptCost::MIN).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let cancel = CancellationToken::new();
        let hash = hash_password(&cancel, raw("hunter2"), cost()).await.unwrap();

        assert!(verify_password(&cancel, hash.clone(), raw("hunter2")).await.unwrap());
        assert!(!verify_password(&cancel, hash, raw("hunter3")).await.unwrap());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = hash_password(&cancel, raw("hunter2"), cost()).await;
        assert!(matches!(result, Err(AuthError::Cancelled)));
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_internal() {
        let cancel = CancellationToken::new();
        let garbage = UserPassword::from_db(b"plaintext".to_vec()).unwrap();

        let result = verify_password(&cancel, garbage, raw("plaintext")).await;
        assert!(matches!(result, Err(AuthError::Internal { .. })));
    }
}
