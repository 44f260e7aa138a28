use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reeltrack_api::{
    api::{create_router, AppState},
    config::Config,
    db,
    services::tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reeltrack_api=info,tower_http=info")),
        )
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let provider = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(Arc::new(config), provider, pool);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
