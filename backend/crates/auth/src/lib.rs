//! Auth (Single Sign-On) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, token claims
//! - `application/` - The auth service and its configuration
//! - `infra/` - SQLite implementations of the repository traits
//! - `presentation/` - RPC handlers, DTOs, router
//!
//! ## Features
//! - User registration with email + password
//! - Login issuing a JWT signed with the requesting app's secret
//! - Admin flag lookup for other services
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, cost taken from configuration
//! - Unknown email and wrong password are reported identically
//! - Internal failures reach the wire only as "internal error"

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::service::{AuthService, Authenticator};
pub use domain::token::TokenClaims;
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteStorage;
pub use presentation::router::{auth_router, rpc_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
