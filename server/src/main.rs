// Courtside server entry point

use std::net::SocketAddr;

use courtside_lib::services::AssetDirectory;
use courtside_lib::utils::database::{get_database_path, Database};

mod auth;
mod config;
mod error;
mod forms;
mod routes;
mod state;
mod uploads;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize tracing; `log` records from the library are forwarded
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtside_server=info,courtside_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    if let Err(e) = run(config).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), String> {
    let db = Database::new(get_database_path(&config.data_dir))?;
    let assets = AssetDirectory::new(config.data_dir.join("uploads"))
        .map_err(|e| format!("Failed to open upload directory: {}", e))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(db, assets, config);
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Courtside running on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| format!("Server stopped: {}", e))
}
