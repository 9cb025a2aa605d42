#![warn(clippy::all, clippy::nursery, clippy::pedantic)]
use std::net::SocketAddr;

use escola::{AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("escola=info,tower_http=info")),
        )
        .init();

    let config = Config::load()?;
    let state = AppState::new(&config)?;
    tracing::info!(api_base_url = %state.api_base_url, "upstream API");

    let app = escola::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
