//! Balance reads and mutations.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/deposit", post(deposit))
        .route("/transfer", post(transfer))
        .route("/balance", get(balance))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.list_accounts().await {
        Ok(accounts) => {
            let users = accounts
                .into_iter()
                .map(dto::UserOut::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DepositRequest>,
) -> axum::response::Response {
    match services.ledger.deposit(&body.email, body.amount).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Deposit successful",
                "balance": balance,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TransferRequest>,
) -> axum::response::Response {
    match services
        .ledger
        .transfer(&body.sender_email, &body.receiver_email, body.amount)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Transfer successful",
                "sender_balance": outcome.sender_balance,
                "receiver_balance": outcome.receiver_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn balance(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::BalanceQuery>,
) -> axum::response::Response {
    match services.ledger.balance(&query.email).await {
        Ok(account) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "username": account.username,
                "email": account.email,
                "balance": account.balance,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
