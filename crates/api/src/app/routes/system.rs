use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AccountContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The authenticated account's own view, resolved from the bearer token.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(account): Extension<AccountContext>,
) -> axum::response::Response {
    match services.ledger.balance(account.email()).await {
        Ok(found) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": found.id.as_i64(),
                "username": found.username,
                "email": found.email,
                "balance": found.balance,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
