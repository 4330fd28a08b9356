//! RPC DTOs (Data Transfer Objects)
//!
//! Request fields default to empty/zero when absent; the handlers reject
//! those values explicitly.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// App the token is issued for
    pub app: i64,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("app", &self.app)
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
}

// ============================================================================
// IsAdmin
// ============================================================================

/// IsAdmin request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IsAdminRequest {
    pub id: i64,
}

/// IsAdmin response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}
