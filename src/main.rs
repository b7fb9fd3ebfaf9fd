//! Server entry point: reads settings from the environment, opens the store, optionally seeds it,
//! and serves the API.

use mission_control::config::{apply_seed, load_seed};
use mission_control::{
    app, apply_migrations, ensure_database_exists, AppState, MemoryStore, PgStore, Settings, Store,
    StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mission_control=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let store: Arc<dyn Store> = match &settings.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres { url, max_connections } => {
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(url)
                .await?;
            apply_migrations(&pool).await?;
            tracing::info!(max_connections, "using postgres store");
            Arc::new(PgStore::new(pool))
        }
    };

    if let Some(path) = &settings.seed_path {
        let seed = load_seed(path).await?;
        if !apply_seed(store.as_ref(), &seed).await? {
            tracing::info!(path = %path, "store not empty, seed skipped");
        }
    }

    let router = app(AppState::new(store), settings.body_limit);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
