use anyhow::{Context, Result};
use shared::{
    config::{Config, ConnectionManager, ConnectionPool},
    utils::{Telemetry, TelemetryProviders, init_logger},
};
use storefront::{handler::AppRouter, state::AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let providers = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::new("storefront", endpoint.clone())
                .init()
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    init_logger(
        providers.as_ref().map(|p| &p.logger),
        "storefront",
        is_dev,
        is_enable_file,
    );

    info!("🚀 Starting storefront initialization...");

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(pool, &config);

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    shutdown(providers);

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📜 Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn shutdown(providers: Option<TelemetryProviders>) {
    info!("🛑 Shutting down storefront...");

    if let Some(providers) = providers {
        if let Err(e) = providers.shutdown() {
            warn!("⚠️ Telemetry shutdown incomplete: {e}");
        }
    }
}
