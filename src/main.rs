use std::sync::Arc;

use anyhow::Context;
use chat_relay::appstate::AppState;
use chat_relay::config::Config;
use chat_relay::routes;
use chat_relay::upstream::UpstreamClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    info!("starting server...");

    let config = Config::from_env().context("failed to load configuration")?;
    let upstream = UpstreamClient::new(&config).context("failed to build upstream client")?;
    let state = AppState {
        upstream: Arc::new(upstream),
    };

    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to address: {}", config.bind_addr))?;

    info!(
        "listening on {}",
        listener
            .local_addr()
            .context("failed to get local address")?
    );

    axum::serve(listener, app)
        .await
        .context("failed to start server")?;

    Ok(())
}
