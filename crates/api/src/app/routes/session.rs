//! Registration and login.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    match services
        .ledger
        .register(&body.username, &body.email, &body.password)
        .await
    {
        Ok(issued) => (
            StatusCode::OK,
            Json(dto::TokenResponse {
                access_token: issued.access_token,
                token_type: dto::TOKEN_TYPE_BEARER,
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.ledger.login(&body.email, &body.password).await {
        Ok(issued) => (
            StatusCode::OK,
            Json(dto::LoginResponse {
                access_token: issued.access_token,
                token_type: dto::TOKEN_TYPE_BEARER,
                username: issued.username,
                email: issued.email,
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
