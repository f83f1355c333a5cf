use axum::{serve, Router};
use tokio::net::TcpListener;

use data_analyst_agent::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let app: Router = server::create_app();
    let listener: TcpListener = server::setup_listener().await?;

    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
