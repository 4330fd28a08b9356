//! App (Tenant) Entity
//!
//! Apps are provisioned out of band and are read-only here.

use std::fmt;

use crate::domain::value_object::AppId;

/// App entity
#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    pub name: String,
    /// Symmetric signing key for this tenant's tokens
    pub secret: AppSecret,
}

/// Tenant signing secret
///
/// Debug output is redacted so an `App` can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(Vec<u8>);

impl AppSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
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
    fn test_secret_is_redacted() {
        let app = App {
            id: AppId::new(1).unwrap(),
            name: "test".to_string(),
            secret: AppSecret::new("test-secret"),
        };
        let debug_output = format!("{:?}", app);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("test-secret"));
    }
}
