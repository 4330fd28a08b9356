//! Auth Service
//!
//! Registration, login and the admin-flag query. The service is built once
//! at startup and shared behind an `Arc`; it holds no mutable state, so any
//! number of requests can run through it concurrently.

use std::sync::Arc;
use std::time::Duration;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};
use platform::token::TokenError;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AppReader, UserReader, UserWriter};
use crate::domain::token::issue_token;
use crate::domain::value_object::{AppId, UserId, email::Email};
use crate::error::{AuthError, AuthResult};

/// Operations exposed to the RPC layer
#[trait_variant::make(Authenticator: Send)]
pub trait LocalAuthenticator {
    /// Check credentials and issue a token signed for `app_id`.
    ///
    /// Unknown email and wrong password both fail with
    /// `AuthError::InvalidCredentials`.
    async fn login(
        &self,
        email: &str,
        password: ClearTextPassword,
        app_id: AppId,
    ) -> AuthResult<String>;

    /// Create a user and return the assigned id
    async fn register_new_user(
        &self,
        email: &str,
        password: ClearTextPassword,
    ) -> AuthResult<UserId>;

    /// Whether the user holds the admin flag
    async fn is_admin(&self, user_id: UserId) -> AuthResult<bool>;
}

/// Auth service
pub struct AuthService<W, R, A>
where
    W: UserWriter,
    R: UserReader,
    A: AppReader,
{
    user_writer: Arc<W>,
    user_reader: Arc<R>,
    app_reader: Arc<A>,
    hasher: PasswordHasher,
    /// Verified against when the email is unknown, so both login failures cost one hash
    dummy_hash: HashedPassword,
    token_ttl: Duration,
}

/// Input for [`AuthService`]'s `dummy_hash`
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

impl<W, R, A> AuthService<W, R, A>
where
    W: UserWriter,
    R: UserReader,
    A: AppReader,
{
    /// Build the service. Fails if the configured hashing cost is invalid.
    ///
    /// Computes one hash up front, so this is as slow as a registration.
    pub fn new(
        user_writer: Arc<W>,
        user_reader: Arc<R>,
        app_reader: Arc<A>,
        config: &AuthConfig,
    ) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(config.hashing_cost, config.password_pepper.clone())?;
        let dummy_hash = hasher.hash(&ClearTextPassword::new(DUMMY_PASSWORD))?;

        Ok(Self {
            user_writer,
            user_reader,
            app_reader,
            hasher,
            dummy_hash,
            token_ttl: config.token_ttl,
        })
    }

    async fn hash_password(&self, password: ClearTextPassword) -> AuthResult<HashedPassword> {
        let hasher = self.hasher.clone();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))??;
        Ok(hashed)
    }

    async fn verify_password(
        &self,
        hashed: HashedPassword,
        password: ClearTextPassword,
    ) -> AuthResult<bool> {
        let hasher = self.hasher.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&hashed, &password))
            .await
            .map_err(|e| AuthError::Internal(format!("verify task failed: {e}")))??;
        Ok(valid)
    }
}

impl<W, R, A> Authenticator for AuthService<W, R, A>
where
    W: UserWriter + Send + Sync,
    R: UserReader + Send + Sync,
    A: AppReader + Send + Sync,
{
    #[tracing::instrument(name = "auth.login", skip_all, fields(email = %email, app_id = %app_id))]
    async fn login(
        &self,
        email: &str,
        password: ClearTextPassword,
        app_id: AppId,
    ) -> AuthResult<String> {
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.user_reader.user(&email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                // Same cost as a wrong password
                self.verify_password(self.dummy_hash.clone(), password).await?;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self
            .verify_password(user.password_hash.clone(), password)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let app = self.app_reader.app(app_id).await?;

        let token = issue_token(&user, &app, self.token_ttl).map_err(|e| match e {
            TokenError::EmptySecret => AuthError::InvalidApp,
            other => AuthError::Token(other),
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    #[tracing::instrument(name = "auth.register_new_user", skip_all, fields(email = %email))]
    async fn register_new_user(
        &self,
        email: &str,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        let email = Email::new(email)?;

        if password.is_empty() {
            return Err(AuthError::Validation("password is required"));
        }

        let password_hash = self.hash_password(password).await?;
        let user_id = self.user_writer.save_user(&email, &password_hash).await?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }

    #[tracing::instrument(name = "auth.is_admin", skip_all, fields(user_id = %user_id))]
    async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
        self.user_reader.is_admin(user_id).await
    }
}
