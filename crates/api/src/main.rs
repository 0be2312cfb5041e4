use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    coffer_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let token_ttl = std::env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(chrono::Duration::minutes)
        .unwrap_or_else(|| chrono::Duration::minutes(30));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = coffer_api::app::build_app(jwt_secret, token_ttl).await;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
