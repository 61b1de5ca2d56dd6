//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is the password as the user typed it, zeroized on drop.
//! - [`UserPassword`] is the stored bcrypt hash.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::BcryptCost;
//!
//! let raw = RawPassword::new("hunter2".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, BcryptCost::new(10).unwrap()).unwrap();
//! assert!(hashed.verify(&raw).unwrap());
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{BcryptCost, ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accepts any non-empty string, unmodified
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AppError::bad_request(e.to_string()).with_action("Please enter a password"))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawPassword([REDACTED])")
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored password hash
///
/// Never empty and never equal to the plaintext it was derived from.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password. CPU-bound; call from a blocking context.
    pub fn from_raw(raw: &RawPassword, cost: BcryptCost) -> Result<Self, PasswordHashError> {
        raw.inner().hash(cost).map(Self)
    }

    /// Restore from the `password_hash` column
    pub fn from_db(bytes: Vec<u8>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_bytes(bytes).map(Self)
    }

    /// Hash that matches no password, for equal-cost verification on a
    /// lookup miss
    pub fn placeholder(cost: BcryptCost) -> Self {
        Self(HashedPassword::placeholder(cost))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Check a raw password. CPU-bound; call from a blocking context.
    pub fn verify(&self, raw: &RawPassword) -> Result<bool, PasswordHashError> {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserPassword([HASH])")
    }
}
