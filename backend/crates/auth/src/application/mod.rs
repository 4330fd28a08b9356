//! Application Layer
//!
//! The auth service and its configuration.

pub mod config;
pub mod service;

// Re-exports
pub use config::AuthConfig;
pub use service::{AuthService, Authenticator, LocalAuthenticator};
