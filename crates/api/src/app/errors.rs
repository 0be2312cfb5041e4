use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use coffer_core::DomainError;

/// Map a domain error to its client-visible response.
///
/// Conflict maps to 400 (not 409): duplicate registration has always been
/// a 400 on this API and clients match on it.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, "conflict", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        DomainError::InvalidAmount => {
            json_error(StatusCode::BAD_REQUEST, "invalid_amount", "amount must be positive")
        }
        DomainError::InsufficientFunds => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_funds", "insufficient funds")
        }
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid credentials")
        }
        DomainError::Storage(msg) => {
            tracing::error!(%msg, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "internal storage failure",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
