use std::sync::Arc;

use keyward_api::app::{AppServices, build_app};
use keyward_api::config::AppConfig;
use keyward_auth::Hs256TokenService;
use keyward_infra::PostgresDirectoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    keyward_observability::init();

    let config = AppConfig::from_env()?;

    let pool = sqlx::PgPool::connect(&config.database_url).await?;
    let store = Arc::new(PostgresDirectoryStore::new(pool));
    let tokens = Hs256TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let services = Arc::new(AppServices::new(store, tokens));

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
