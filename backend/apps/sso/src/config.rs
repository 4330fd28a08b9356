//! Server Configuration
//!
//! Read from `SSO_*` environment variables (optionally seeded from `.env`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use auth::AuthConfig;
use auth::application::config::HashingCost;
use thiserror::Error;

const DEFAULT_RPC_PORT: u16 = 44044;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment, selects the log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "prod" => Ok(Env::Prod),
            other => Err(format!("expected local, dev or prod, got {other}")),
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Env::Local => "local",
            Env::Dev => "dev",
            Env::Prod => "prod",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Env,
    /// SQLite database file, created if missing
    pub storage_path: PathBuf,
    pub rpc_port: u16,
    /// Per-request deadline
    pub rpc_timeout: Duration,
    pub auth: AuthConfig,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = parse_or(&lookup, "SSO_ENV", Env::default())?;

        let storage_path = lookup("SSO_STORAGE_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("SSO_STORAGE_PATH"))?;

        let rpc_port = parse_or(&lookup, "SSO_RPC_PORT", DEFAULT_RPC_PORT)?;
        let rpc_timeout = Duration::from_secs(parse_or(
            &lookup,
            "SSO_RPC_TIMEOUT_SECS",
            DEFAULT_RPC_TIMEOUT_SECS,
        )?);
        let token_ttl = Duration::from_secs(parse_or(
            &lookup,
            "SSO_TOKEN_TTL_SECS",
            DEFAULT_TOKEN_TTL_SECS,
        )?);

        let owasp = HashingCost::owasp();
        let hashing_cost = HashingCost {
            memory_kib: parse_or(&lookup, "SSO_HASH_MEMORY_KIB", owasp.memory_kib)?,
            iterations: parse_or(&lookup, "SSO_HASH_ITERATIONS", owasp.iterations)?,
            parallelism: parse_or(&lookup, "SSO_HASH_PARALLELISM", owasp.parallelism)?,
        };

        let password_pepper = lookup("SSO_PASSWORD_PEPPER")
            .filter(|v| !v.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            env,
            storage_path,
            rpc_port,
            rpc_timeout,
            auth: AuthConfig {
                token_ttl,
                hashing_cost,
                password_pepper,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.is_empty() => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
