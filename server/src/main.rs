//! HBnB API server.
//!
//! Run from repo root: `cargo run -p hbnb-server`
//! Configure with HBNB_API_HOST, HBNB_API_PORT, HBNB_TYPE_STORAGE and friends
//! (a `.env` file is read if present).

use hbnb_api::{app, open_storage, AppState, ServerConfig, API_PREFIX};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads `.env` too, so RUST_LOG from there reaches the filter below.
    let config = ServerConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hbnb_api=info,hbnb_server=info")),
        )
        .init();

    let storage = open_storage(&config.storage).await?;
    let router = app(AppState::new(storage));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("HBnB API listening on http://{}{}", addr, API_PREFIX);
    axum::serve(listener, router).await?;
    Ok(())
}
