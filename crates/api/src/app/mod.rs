//! HTTP API application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection and ledger service construction
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs (the wire-compatibility surface)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(jwt_secret: String, token_ttl: chrono::Duration) -> Router {
    let services = Arc::new(services::build_services(jwt_secret, token_ttl).await);
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = Router::new()
        .route("/me", get(routes::system::me))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
