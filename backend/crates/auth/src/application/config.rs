//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::BcryptCost;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued tokens; `exp = now + token_ttl`
    pub token_ttl: Duration,
    /// bcrypt cost used for new password hashes
    pub password_cost: BcryptCost,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600), // 1 hour
            password_cost: BcryptCost::DEFAULT,
        }
    }
}

impl AuthConfig {
    pub fn new(token_ttl: Duration, password_cost: BcryptCost) -> Self {
        Self {
            token_ttl,
            password_cost,
        }
    }

    /// Lowest accepted bcrypt cost, to keep test suites fast
    pub fn for_tests() -> Self {
        Self {
            password_cost: BcryptCost::new(BcryptCost::MIN).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Token TTL in whole seconds, as encoded in `exp`
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}
