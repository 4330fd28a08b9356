//! Error conversions - Wire rendering
//!
//! Converts [`AppError`] into framework responses.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use http::StatusCode;

        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Twirp-style error body
        let body = serde_json::json!({
            "code": self.kind(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[tokio::test]
    async fn test_into_response_body() {
        use axum::response::IntoResponse;

        let response = AppError::new(ErrorKind::Internal, "internal error").into_response();
        assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["message"], "internal error");
    }

    #[tokio::test]
    async fn test_into_response_status_mapping() {
        use axum::response::IntoResponse;

        let response = AppError::new(ErrorKind::AlreadyExists, "user already exists").into_response();
        assert_eq!(response.status(), http::StatusCode::CONFLICT);

        let response = AppError::new(ErrorKind::InvalidArgument, "email is required").into_response();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);

        let response = AppError::not_found("user not found").into_response();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);

        let response = AppError::new(ErrorKind::DeadlineExceeded, "deadline exceeded").into_response();
        assert_eq!(response.status(), http::StatusCode::GATEWAY_TIMEOUT);
    }
}
