//! App Secret Value Object
//!
//! HMAC key of a registered app. Only read while minting a token.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw signing key bytes, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AppSecret(Vec<u8>);

impl AppSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppSecret").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redaction() {
        let secret = AppSecret::new(b"super-secret-key".to_vec());
        let debug_output = format!("{:?}", secret);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_bytes_kept_raw() {
        let secret = AppSecret::new("test-secret");
        assert_eq!(secret.as_bytes(), b"test-secret");
        assert!(!secret.is_empty());
    }
}
