//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

pub use platform::password::HashingCost;

/// Default token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    /// Argon2 cost for new password hashes
    pub hashing_cost: HashingCost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: DEFAULT_TOKEN_TTL,
            hashing_cost: HashingCost::owasp(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development and tests (cheapest hashing cost)
    pub fn development() -> Self {
        Self {
            hashing_cost: HashingCost::minimal(),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("hashing_cost", &self.hashing_cost)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
