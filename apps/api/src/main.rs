mod config;
mod dictionaries;
mod errors;
mod export;
mod models;
mod parsing;
mod prompts;
mod routes;
mod state;
mod store;
mod templates;
mod validators;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StateBackend};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::persistence::{
    hydrate, FileStorage, MemoryStorage, Persister, RedisStorage, StateStorage,
};
use crate::store::CvStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting h2cv v{}", env!("CARGO_PKG_VERSION"));

    let storage = build_storage(&config)?;
    info!("State storage: {}", storage.describe());

    // Restore the saved wizard, then persist every change from here on
    let restored = tokio::task::spawn_blocking({
        let storage = storage.clone();
        move || hydrate(storage.as_ref())
    })
    .await?;
    let mut store = CvStore::new(restored);
    let (persister, _writer) = Persister::spawn(storage);
    store.subscribe(Arc::new(persister));

    let state = AppState::new(store, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_storage(config: &Config) -> Result<Arc<dyn StateStorage>> {
    let storage: Arc<dyn StateStorage> = match &config.backend {
        StateBackend::File(path) => Arc::new(FileStorage::new(path.clone())),
        StateBackend::Redis { url } => {
            let client = redis::Client::open(url.as_str())?;
            Arc::new(RedisStorage::new(client, config.state_key.clone()))
        }
        StateBackend::Memory => Arc::new(MemoryStorage::default()),
    };
    Ok(storage)
}
