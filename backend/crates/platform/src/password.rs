//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Salt embedded in the modular-crypt output (`$2b$<cost>$<salt><hash>`)
//! - Tunable cost factor with a hard floor
//! - Zeroization of clear-text passwords
//!
//! Passwords are taken verbatim: no trimming, no Unicode normalization and no
//! strength policy. Policy is the caller's concern; the only rule enforced
//! here is that a password is not empty.
//!
//! bcrypt only reads [`MAX_PASSWORD_BYTES`] bytes of input. Longer passwords
//! are never truncated: hashing one fails, and verifying one is a mismatch.
//!
//! bcrypt is CPU-bound. Async callers should run [`ClearTextPassword::hash`]
//! and [`HashedPassword::verify`] on a blocking pool.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Longest password bcrypt can hash without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost factor outside the supported range
    #[error("bcrypt cost must be between {min} and {max} (got {actual})")]
    CostOutOfRange { min: u32, max: u32, actual: u32 },

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[source] bcrypt::BcryptError),

    /// Stored bytes are not a bcrypt hash
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Cost
// ============================================================================

/// Validated bcrypt cost factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptCost(u32);

impl BcryptCost {
    /// Lowest cost accepted for stored credentials
    pub const MIN: u32 = 10;
    /// Highest cost bcrypt supports
    pub const MAX: u32 = 31;
    /// Library default (currently 12)
    pub const DEFAULT: BcryptCost = BcryptCost(bcrypt::DEFAULT_COST);

    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(Self::MIN..=Self::MAX).contains(&cost) {
            return Err(PasswordHashError::CostOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: cost,
            });
        }
        Ok(Self(cost))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BcryptCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{BcryptCost, ClearTextPassword};
///
/// let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
/// let hashed = password.hash(BcryptCost::new(10).unwrap()).unwrap();
/// assert!(hashed.verify(&password).unwrap());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a password exactly as received
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with a fresh random salt
    ///
    /// Fails with `HashingFailed` when the password is longer than
    /// [`MAX_PASSWORD_BYTES`].
    pub fn hash(&self, cost: BcryptCost) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::non_truncating_hash(self.as_bytes(), cost.get())
            .map_err(PasswordHashError::HashingFailed)?;

        Ok(HashedPassword {
            hash: hash.into_bytes(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format, stored as raw bytes
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: Vec<u8>,
}

impl HashedPassword {
    /// Wrap bytes read back from storage
    ///
    /// Only emptiness is checked here. A malformed value surfaces as
    /// [`PasswordHashError::InvalidHashFormat`] on [`HashedPassword::verify`].
    pub fn from_bytes(hash: Vec<u8>) -> Result<Self, PasswordHashError> {
        if hash.is_empty() {
            return Err(PasswordHashError::InvalidHashFormat);
        }
        Ok(Self { hash })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Stand-in hash at `cost` that no password matches
    ///
    /// Verifying against it costs the same as verifying against a real hash
    /// of that cost, so a lookup miss can be made to take as long as a
    /// wrong password. The all-zero salt and digest are valid bcrypt base64.
    pub fn placeholder(cost: BcryptCost) -> Self {
        let hash = format!("$2b${:02}${}", cost.get(), ".".repeat(53));
        Self {
            hash: hash.into_bytes(),
        }
    }

    /// Verify a password against this hash
    ///
    /// Returns `Ok(false)` on mismatch, including for passwords longer than
    /// [`MAX_PASSWORD_BYTES`], which can never have been hashed. Errors only
    /// when the stored value cannot be parsed as a bcrypt hash.
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        let hash =
            std::str::from_utf8(&self.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        match bcrypt::non_truncating_verify(password.as_bytes(), hash) {
            Ok(matches) => Ok(matches),
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            Err(_) => Err(PasswordHashError::InvalidHashFormat),
        }
    }

    /// Cost factor encoded in the hash, if it parses
    pub fn cost(&self) -> Option<u32> {
        let hash = std::str::from_utf8(&self.hash).ok()?;
        hash.split('$').nth(2)?.parse().ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cost() -> BcryptCost {
        BcryptCost::new(BcryptCost::MIN).unwrap()
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new(String::new());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::Empty);
    }

    #[test]
    fn test_password_kept_verbatim() {
        let password = ClearTextPassword::new("  Spaced Out  ".to_string()).unwrap();
        assert_eq!(password.as_bytes(), b"  Spaced Out  ");
    }

    #[test]
    fn test_cost_bounds() {
        assert!(BcryptCost::new(9).is_err());
        assert!(BcryptCost::new(32).is_err());
        assert_eq!(BcryptCost::new(10).unwrap().get(), 10);
        assert_eq!(BcryptCost::default().get(), bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
        let hashed = password.hash(cost()).unwrap();

        assert!(hashed.verify(&password).unwrap());

        let wrong_password = ClearTextPassword::new("hunter3".to_string()).unwrap();
        assert!(!hashed.verify(&wrong_password).unwrap());
    }

    #[test]
    fn test_hash_is_salted_and_not_plaintext() {
        let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
        let first = password.hash(cost()).unwrap();
        let second = password.hash(cost()).unwrap();

        assert_ne!(first, second);
        assert!(!first.as_bytes().is_empty());
        assert_ne!(first.as_bytes(), b"hunter2");
        assert_eq!(first.cost(), Some(BcryptCost::MIN));
    }

    #[test]
    fn test_stored_bytes_roundtrip() {
        let password = ClearTextPassword::new("s3cret".to_string()).unwrap();
        let hashed = password.hash(cost()).unwrap();

        let restored = HashedPassword::from_bytes(hashed.as_bytes().to_vec()).unwrap();
        assert!(restored.verify(&password).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        assert!(HashedPassword::from_bytes(Vec::new()).is_err());

        let garbage = HashedPassword::from_bytes(b"not_a_bcrypt_hash".to_vec()).unwrap();
        let password = ClearTextPassword::new("anything".to_string()).unwrap();
        assert!(matches!(
            garbage.verify(&password),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_long_password_not_truncated() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let at_limit = ClearTextPassword::new(prefix.clone()).unwrap();
        let hashed = at_limit.hash(cost()).unwrap();
        assert!(hashed.verify(&at_limit).unwrap());

        let longer = ClearTextPassword::new(format!("{prefix}-suffix")).unwrap();
        assert!(matches!(
            longer.hash(cost()),
            Err(PasswordHashError::HashingFailed(bcrypt::BcryptError::Truncation(_)))
        ));
        assert!(!hashed.verify(&longer).unwrap());
    }

    #[test]
    fn test_placeholder_never_matches() {
        let placeholder = HashedPassword::placeholder(cost());
        assert_eq!(placeholder.cost(), Some(BcryptCost::MIN));

        let password = ClearTextPassword::new("hunter2".to_string()).unwrap();
        assert!(!placeholder.verify(&password).unwrap());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret".to_string()).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash(cost()).unwrap();
        assert!(!format!("{:?}", hashed).contains("$2"));
    }
}
