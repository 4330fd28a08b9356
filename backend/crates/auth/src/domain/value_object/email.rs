//! Email Value Object
//!
//! The email is the account's unique login key. It is stored and looked up
//! exactly as given: no case folding, no trimming, no format rules. Only an
//! empty value is rejected.

use crate::error::{AuthError, AuthResult};

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Wrap a non-empty email
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into();

        if email.is_empty() {
            return Err(AuthError::Validation("email is required"));
        }

        Ok(Self(email))
    }

    /// Create from database value
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
