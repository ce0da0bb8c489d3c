//! HTTP handlers.

mod health;
mod risk;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use riskscope_core::RiskError;

pub use health::health;
pub use risk::risk_scores;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build a JSON error body with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a scoring error onto an HTTP status.
pub fn risk_error_response(err: &RiskError) -> ApiError {
    let status = match err {
        RiskError::UnknownMode(_) => StatusCode::BAD_REQUEST,
        RiskError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}
