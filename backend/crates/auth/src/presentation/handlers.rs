//! RPC Handlers
//!
//! Each handler checks the required fields, calls the service, and lets
//! `AuthError` render the wire status.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::service::Authenticator;
use crate::domain::value_object::{AppId, UserId};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    IsAdminRequest, IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};

/// Shared state for RPC handlers
pub struct RpcState<S> {
    pub auth: Arc<S>,
}

// Manual impl: derive would require `S: Clone`.
impl<S> Clone for RpcState<S> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

fn require_text(value: &str, message: &'static str) -> AuthResult<()> {
    if value.is_empty() {
        return Err(AuthError::Validation(message));
    }
    Ok(())
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth.Auth/Login
pub async fn login<S>(
    State(state): State<RpcState<S>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    S: Authenticator + Send + Sync + 'static,
{
    let Json(req) = payload?;

    require_text(&req.email, "email is required")?;
    require_text(&req.password, "password is required")?;
    let app_id = AppId::new(req.app).map_err(|_| AuthError::Validation("app is required"))?;

    let token = state
        .auth
        .login(&req.email, ClearTextPassword::new(req.password), app_id)
        .await?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth.Auth/Register
pub async fn register<S>(
    State(state): State<RpcState<S>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<RegisterResponse>>
where
    S: Authenticator + Send + Sync + 'static,
{
    let Json(req) = payload?;

    require_text(&req.email, "email is required")?;
    require_text(&req.password, "password is required")?;

    let user_id = state
        .auth
        .register_new_user(&req.email, ClearTextPassword::new(req.password))
        .await?;

    Ok(Json(RegisterResponse { id: user_id.get() }))
}

// ============================================================================
// IsAdmin
// ============================================================================

/// POST /auth.Auth/IsAdmin
pub async fn is_admin<S>(
    State(state): State<RpcState<S>>,
    payload: Result<Json<IsAdminRequest>, JsonRejection>,
) -> AuthResult<Json<IsAdminResponse>>
where
    S: Authenticator + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let user_id = UserId::new(req.id).map_err(|_| AuthError::Validation("id is required"))?;

    let is_admin = state.auth.is_admin(user_id).await?;

    Ok(Json(IsAdminResponse { is_admin }))
}
