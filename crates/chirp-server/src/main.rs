use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use chirp_db::{Database, DatabaseConfig};
use chirp_server::build_app;
use chirp_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chirp=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let auth = config.auth_mode()?;

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;

    let addr = config.bind_address();
    tracing::info!(
        environment = %config.environment,
        require_auth = auth.is_required(),
        "Starting server on {addr}"
    );

    let app = build_app(db, auth, &config)?;

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
