use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::calculator::WeightError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidWeight(#[from] WeightError),

    #[error("Calculation failed")]
    CalculationFailed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidWeight(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::CalculationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = json!({ "error": message });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn error_route(err: fn() -> AppError) -> Router {
        Router::new().route("/t", get(move || async move { Err::<(), _>(err()) }))
    }

    async fn fire(app: Router) -> (StatusCode, serde_json::Value) {
        let res = app
            .oneshot(Request::builder().uri("/t").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_weight_maps_to_400_with_exact_message() {
        let (status, body) = fire(error_route(|| WeightError::TooLow.into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Weight must be at least 20 kg for accurate calculations."
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) =
            fire(error_route(|| AppError::NotFound("History entry not found".into()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "History entry not found");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_401() {
        let (status, body) = fire(error_route(|| AppError::Unauthorized)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Authentication required");
    }

    #[tokio::test]
    async fn test_calculation_failure_maps_to_500_with_fixed_message() {
        let (status, body) = fire(error_route(|| AppError::CalculationFailed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Calculation failed");
    }

    #[tokio::test]
    async fn test_internal_errors_never_leak_detail() {
        let (status, body) =
            fire(error_route(|| anyhow::anyhow!("secret connection string").into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_error_envelope_is_flat() {
        let (_, body) = fire(error_route(|| AppError::Unauthorized)).await;
        assert!(body["error"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 1);
    }
}
