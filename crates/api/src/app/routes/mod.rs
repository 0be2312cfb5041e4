use axum::Router;

pub mod ledger;
pub mod session;
pub mod system;

/// Router for the public (unauthenticated) endpoint set.
pub fn router() -> Router {
    Router::new().merge(session::router()).merge(ledger::router())
}
