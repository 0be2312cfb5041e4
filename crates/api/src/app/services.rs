//! Store selection and ledger service wiring.

use std::sync::Arc;

use coffer_accounts::{AccountStore, LedgerService};
use coffer_auth::{Hs256TokenService, TokenService};
use coffer_infra::{InMemoryAccountStore, PgAccountStore};

pub struct AppServices {
    pub ledger: Arc<LedgerService>,
    pub tokens: Arc<dyn TokenService>,
}

/// Build services from the environment.
///
/// `USE_PERSISTENT_STORES=true` selects the Postgres store (`DATABASE_URL`
/// required); anything else gets the in-memory store (dev/test).
pub async fn build_services(jwt_secret: String, token_ttl: chrono::Duration) -> AppServices {
    let tokens: Arc<dyn TokenService> =
        Arc::new(Hs256TokenService::new(jwt_secret.as_bytes(), token_ttl));

    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let store: Arc<dyn AccountStore> = if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .expect("failed to connect to Postgres");

        let store = PgAccountStore::new(pool);
        store.migrate().await.expect("failed to ensure schema");

        tracing::info!("using Postgres account store");
        Arc::new(store)
    } else {
        tracing::info!("using in-memory account store");
        Arc::new(InMemoryAccountStore::new())
    };

    AppServices {
        ledger: Arc::new(LedgerService::new(store, tokens.clone())),
        tokens,
    }
}
