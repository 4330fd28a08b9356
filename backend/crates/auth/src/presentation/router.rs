//! RPC Router
//!
//! One POST route per RPC method, named `/<package>.<Service>/<Method>`.

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::service::{AuthService, Authenticator};
use crate::error::AuthResult;
use crate::infra::sqlite::SqliteStorage;
use crate::presentation::handlers::{self, RpcState};

pub const LOGIN_PATH: &str = "/auth.Auth/Login";
pub const REGISTER_PATH: &str = "/auth.Auth/Register";
pub const IS_ADMIN_PATH: &str = "/auth.Auth/IsAdmin";

/// Service type served by [`auth_router`]
pub type SqliteAuthService = AuthService<SqliteStorage, SqliteStorage, SqliteStorage>;

/// Create the RPC router with SQLite storage
pub fn auth_router(storage: SqliteStorage, config: &AuthConfig) -> AuthResult<Router> {
    let storage = Arc::new(storage);
    let service = AuthService::new(storage.clone(), storage.clone(), storage, config)?;

    Ok(rpc_router::<SqliteAuthService>(Arc::new(service)))
}

/// Create the RPC router for any `Authenticator` implementation
pub fn rpc_router<S>(auth: Arc<S>) -> Router
where
    S: Authenticator + Send + Sync + 'static,
{
    let state = RpcState { auth };

    Router::new()
        .route(LOGIN_PATH, post(handlers::login::<S>))
        .route(REGISTER_PATH, post(handlers::register::<S>))
        .route(IS_ADMIN_PATH, post(handlers::is_admin::<S>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use platform::password::ClearTextPassword;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::domain::value_object::{AppId, UserId};
    use crate::error::AuthError;

    /// Scripted authenticator counting how often it is reached
    #[derive(Default)]
    struct FakeAuth {
        calls: AtomicUsize,
        fail_with: Option<fn() -> AuthError>,
    }

    impl FakeAuth {
        fn failing(f: fn() -> AuthError) -> Self {
            Self {
                fail_with: Some(f),
                ..Default::default()
            }
        }

        fn record(&self) -> AuthResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(f) => Err(f()),
                None => Ok(()),
            }
        }
    }

    impl Authenticator for FakeAuth {
        async fn login(
            &self,
            _email: &str,
            _password: ClearTextPassword,
            _app_id: AppId,
        ) -> AuthResult<String> {
            self.record()?;
            Ok("signed-token".to_string())
        }

        async fn register_new_user(
            &self,
            _email: &str,
            _password: ClearTextPassword,
        ) -> AuthResult<UserId> {
            self.record()?;
            Ok(UserId::from_raw(7))
        }

        async fn is_admin(&self, user_id: UserId) -> AuthResult<bool> {
            self.record()?;
            Ok(user_id.get() == 1)
        }
    }

    async fn call(auth: Arc<FakeAuth>, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = rpc_router(auth).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_login_ok() {
        let auth = Arc::new(FakeAuth::default());
        let (status, body) = call(
            auth.clone(),
            LOGIN_PATH,
            json!({"email": "alice@example.com", "password": "pw", "app": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"token": "signed-token"}));
        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_without_app_never_reaches_service() {
        let auth = Arc::new(FakeAuth::default());
        let (status, body) = call(
            auth.clone(),
            LOGIN_PATH,
            json!({"email": "alice@example.com", "password": "pw", "app": 0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
        assert_eq!(body["message"], "app is required");
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_invalid_argument() {
        let auth = Arc::new(FakeAuth::default());

        let (status, body) = call(auth.clone(), LOGIN_PATH, json!({"password": "pw", "app": 1})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "email is required");

        let (status, body) =
            call(auth.clone(), REGISTER_PATH, json!({"email": "alice@example.com"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password is required");

        let (status, body) = call(auth.clone(), IS_ADMIN_PATH, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id is required");

        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_argument() {
        let auth = Arc::new(FakeAuth::default());
        let request = Request::builder()
            .method("POST")
            .uri(LOGIN_PATH)
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = rpc_router(auth.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_ok() {
        let auth = Arc::new(FakeAuth::default());
        let (status, body) = call(
            auth,
            REGISTER_PATH,
            json!({"email": "alice@example.com", "password": "Sup3rSecret!"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 7}));
    }

    #[tokio::test]
    async fn test_is_admin_ok() {
        let auth = Arc::new(FakeAuth::default());
        let (status, body) = call(auth, IS_ADMIN_PATH, json!({"id": 1})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"isAdmin": true}));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let cases: [(fn() -> AuthError, &str, Value, StatusCode, &str); 5] = [
            (
                || AuthError::InvalidCredentials,
                LOGIN_PATH,
                json!({"email": "a@example.com", "password": "pw", "app": 1}),
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
            ),
            (
                || AuthError::AppNotFound,
                LOGIN_PATH,
                json!({"email": "a@example.com", "password": "pw", "app": 9}),
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
            ),
            (
                || AuthError::UserExists,
                REGISTER_PATH,
                json!({"email": "a@example.com", "password": "pw"}),
                StatusCode::CONFLICT,
                "ALREADY_EXISTS",
            ),
            (
                || AuthError::UserNotFound,
                IS_ADMIN_PATH,
                json!({"id": 42}),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                || AuthError::Validation("email is required"),
                REGISTER_PATH,
                json!({"email": "bad", "password": "pw"}),
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
            ),
        ];

        for (fail, path, body, expected_status, expected_code) in cases {
            let (status, response) = call(Arc::new(FakeAuth::failing(fail)), path, body).await;
            assert_eq!(status, expected_status, "{path}");
            assert_eq!(response["code"], expected_code, "{path}");
        }
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque() {
        let auth = Arc::new(FakeAuth::failing(|| {
            AuthError::Internal("sqlite: database is locked".to_string())
        }));
        let (status, body) = call(
            auth,
            REGISTER_PATH,
            json!({"email": "a@example.com", "password": "pw"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"code": "INTERNAL", "message": "internal error"}));
    }
}
