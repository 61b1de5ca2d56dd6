//! Server Configuration
//!
//! Read from `SSO_*` environment variables. Durations use humantime syntax
//! (`10s`, `1h`, `90m`).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::password::BcryptCost;

pub const DEFAULT_HTTP_PORT: u16 = 44044;
pub const DEFAULT_HTTP_TIMEOUT: &str = "10s";
pub const DEFAULT_TOKEN_TTL: &str = "1h";

/// Deployment environment; only affects logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Local,
    Dev,
    Prod,
}

impl FromStr for Env {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "prod" => Ok(Env::Prod),
            other => bail!("expected one of local, dev, prod (got {other:?})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Env,
    pub storage_path: PathBuf,
    pub http_port: u16,
    /// Per-request deadline
    pub http_timeout: Duration,
    pub token_ttl: Duration,
    pub bcrypt_cost: BcryptCost,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let env = var("SSO_ENV", "local").parse().context("SSO_ENV")?;

        let storage_path = lookup("SSO_STORAGE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .context("SSO_STORAGE_PATH must be set")?;

        let http_port = var("SSO_HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("SSO_HTTP_PORT")?;

        let http_timeout = humantime::parse_duration(&var("SSO_HTTP_TIMEOUT", DEFAULT_HTTP_TIMEOUT))
            .context("SSO_HTTP_TIMEOUT")?;

        let token_ttl = humantime::parse_duration(&var("SSO_TOKEN_TTL", DEFAULT_TOKEN_TTL))
            .context("SSO_TOKEN_TTL")?;
        if token_ttl.is_zero() {
            bail!("SSO_TOKEN_TTL must be positive");
        }

        let bcrypt_cost = match lookup("SSO_BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().context("SSO_BCRYPT_COST")?;
                BcryptCost::new(cost).context("SSO_BCRYPT_COST")?
            }
            None => BcryptCost::DEFAULT,
        };

        Ok(Self {
            env,
            storage_path,
            http_port,
            http_timeout,
            token_ttl,
            bcrypt_cost,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.token_ttl, self.bcrypt_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SSO_STORAGE_PATH", "./storage/sso.db")]).unwrap();

        assert_eq!(config.env, Env::Local);
        assert_eq!(config.http_port, 44044);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.bcrypt_cost.get(), 12);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SSO_ENV", "prod"),
            ("SSO_STORAGE_PATH", "/var/lib/sso.db"),
            ("SSO_HTTP_PORT", "8080"),
            ("SSO_HTTP_TIMEOUT", "500ms"),
            ("SSO_TOKEN_TTL", "15m"),
            ("SSO_BCRYPT_COST", "10"),
        ])
        .unwrap();

        assert_eq!(config.env, Env::Prod);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.http_timeout, Duration::from_millis(500));
        assert_eq!(config.auth_config().token_ttl, Duration::from_secs(900));
        assert_eq!(config.auth_config().password_cost.get(), 10);
    }

    #[test]
    fn test_storage_path_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("SSO_STORAGE_PATH"));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let base = ("SSO_STORAGE_PATH", "sso.db");

        let err = load(&[base, ("SSO_ENV", "staging")]).unwrap_err();
        assert_eq!(err.to_string(), "SSO_ENV");

        let err = load(&[base, ("SSO_BCRYPT_COST", "4")]).unwrap_err();
        assert_eq!(err.to_string(), "SSO_BCRYPT_COST");

        let err = load(&[base, ("SSO_TOKEN_TTL", "forever")]).unwrap_err();
        assert_eq!(err.to_string(), "SSO_TOKEN_TTL");
    }
}
