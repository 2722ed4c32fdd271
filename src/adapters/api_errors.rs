use crate::domain::error::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer and nowhere else.
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            StoreError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            StoreError::Signature(_) => (
                StatusCode::UNAUTHORIZED,
                "signature_error",
                "invalid callback signature".to_string(),
            ),
            StoreError::OrderNotFound(_) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "order not found".to_string(),
            ),
            StoreError::Gateway(err) => {
                tracing::error!("payment gateway error: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "gateway_error",
                    "payment gateway unavailable".to_string(),
                )
            }
            StoreError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
