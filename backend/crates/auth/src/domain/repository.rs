//! Repository Traits
//!
//! Capability interfaces for data persistence, one per role. Implementation
//! is in the infrastructure layer. Each method is a single storage operation:
//! no retries, no caching.
//!
//! Implementations classify their driver errors before returning: the
//! domain-meaningful conditions come back as `UserExists`, `UserNotFound`
//! or `AppNotFound`, everything else as `AuthError::Storage`.

use platform::password::HashedPassword;

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::{AppId, UserId, email::Email};
use crate::error::AuthResult;

/// Registration-side writes
#[trait_variant::make(UserWriter: Send)]
pub trait LocalUserWriter {
    /// Persist a new user and return the assigned id.
    ///
    /// Fails with `AuthError::UserExists` if the email is taken.
    async fn save_user(&self, email: &Email, password_hash: &HashedPassword) -> AuthResult<UserId>;
}

/// User lookups
#[trait_variant::make(UserReader: Send)]
pub trait LocalUserReader {
    /// Find user by email. Fails with `AuthError::UserNotFound` if absent.
    async fn user(&self, email: &Email) -> AuthResult<User>;

    /// Admin flag for a user. Fails with `AuthError::UserNotFound` if the id
    /// does not resolve.
    async fn is_admin(&self, user_id: UserId) -> AuthResult<bool>;
}

/// Tenant lookups
#[trait_variant::make(AppReader: Send)]
pub trait LocalAppReader {
    /// Find app by id. Fails with `AuthError::AppNotFound` if absent.
    async fn app(&self, app_id: AppId) -> AuthResult<App>;
}
