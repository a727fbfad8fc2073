use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use pms_api::{build_router, AppState};
use pms_infrastructure::{create_pool, postgres_repositories, run_migrations};
use pms_security::JwtService;
use pms_shared::config::AppConfig;
use pms_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Held until shutdown so buffered file logs are flushed
    let _log_guard = init_telemetry(&config.logging)?;

    info!(env = %config.app.env, "{} starting...", config.app.name);

    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await.context("Failed to run migrations")?;
        info!("Database migrations applied.");
    }

    let jwt = JwtService::new(
        config.jwt.secret.clone(),
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    );
    let state = AppState::new(postgres_repositories(pool.clone()), jwt, &config.tenancy);
    let app = build_router(state, &config.cors);

    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
