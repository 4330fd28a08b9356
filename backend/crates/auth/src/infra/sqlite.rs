//! SQLite Repository Implementations

use std::path::Path;
use std::str::FromStr;

use platform::password::HashedPassword;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::entity::{
    app::{App, AppSecret},
    user::User,
};
use crate::domain::repository::{AppReader, UserReader, UserWriter};
use crate::domain::value_object::{AppId, UserId, email::Email};
use crate::error::{AuthError, AuthResult};

/// SQLite-backed storage for users and apps
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file at `path`
    pub async fn connect(path: impl AsRef<Path>) -> AuthResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Ok(Self::new(pool))
    }

    /// Private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// each new connection to `:memory:` would see an empty database.
    pub async fn in_memory() -> AuthResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema
    pub async fn migrate(&self) -> AuthResult<()> {
        sqlx::migrate!("../../../database/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.into()))?;

        tracing::info!("Database migrations applied");

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ============================================================================
// User Writer Implementation
// ============================================================================

impl UserWriter for SqliteStorage {
    async fn save_user(&self, email: &Email, password_hash: &HashedPassword) -> AuthResult<UserId> {
        let result = sqlx::query("INSERT INTO users (email, pass_hash) VALUES (?, ?)")
            .bind(email.as_str())
            .bind(password_hash.as_bytes())
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UserExists,
                other => AuthError::Storage(other),
            })?;

        UserId::new(result.last_insert_rowid())
            .map_err(|e| AuthError::Internal(format!("Invalid user id: {}", e)))
    }
}

// ============================================================================
// User Reader Implementation
// ============================================================================

impl UserReader for SqliteStorage {
    async fn user(&self, email: &Email) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                pass_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = ?")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

// ============================================================================
// App Reader Implementation
// ============================================================================

impl AppReader for SqliteStorage {
    async fn app(&self, app_id: AppId) -> AuthResult<App> {
        let row = sqlx::query_as::<_, AppRow>("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(app_id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(AuthError::AppNotFound)?.into_app()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: Vec<u8>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_bytes(&self.pass_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid pass_hash: {}", e)))?;

        Ok(User {
            id: UserId::new(self.id)
                .map_err(|e| AuthError::Internal(format!("Invalid user id: {}", e)))?,
            email: Email::from_db(self.email),
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl AppRow {
    fn into_app(self) -> AuthResult<App> {
        Ok(App {
            id: AppId::new(self.id)
                .map_err(|e| AuthError::Internal(format!("Invalid app id: {}", e)))?,
            name: self.name,
            secret: AppSecret::new(self.secret),
        })
    }
}
