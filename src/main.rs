use log::{info, warn};
use tokio::net::TcpListener;

use crate::api::AppState;
use crate::config::Config;
use crate::store::TrackStore;

mod api;
mod config;
mod docs;
mod error;
mod library;
mod logger;
mod store;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if let Err(e) = logger::init(config.log_level) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let store = TrackStore::new();
    info!("Seeded playlist with {} tracks", store.len());

    let app = api::create_router(AppState::new(store));

    let listener = TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!("Playlist API listening at http://{}", addr);
    info!("Docs available at http://{}{}", addr, docs::DOCS_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
