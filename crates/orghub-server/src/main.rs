//! OrgHub Server — application entry point.

use orghub_server::config::Config;
use orghub_server::routes;
use orghub_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("orghub_server=info".parse().unwrap())
                .add_directive("orghub_registry=info".parse().unwrap())
                .add_directive("orghub_db=info".parse().unwrap()),
        )
        .json()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting OrgHub server...");

    let db = match orghub_db::DbManager::connect(&config.db).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = orghub_db::run_migrations(db.client()).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let state = AppState::new(db.client().clone(), config.auth.clone());
    let app = routes::app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "OrgHub server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("OrgHub server stopped.");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
