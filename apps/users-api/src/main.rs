use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{InMemoryUserRepository, PasswordHasher};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageConfig};
use state::{AppState, Storage};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let storage = match &config.storage {
        StorageConfig::Postgres(pg) => {
            let db = database::postgres::connect_from_config_with_retry(pg.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if config.run_migrations {
                database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
            }

            Storage::Postgres(db)
        }
        StorageConfig::Memory => {
            warn!("Using in-memory storage; users are lost on restart");
            Storage::Memory(InMemoryUserRepository::new())
        }
    };

    let params = &config.password_hash;
    let hasher = PasswordHasher::with_params(params.memory_kib, params.iterations, params.parallelism)
        .map_err(|e| eyre::eyre!("Invalid password hash parameters: {}", e))?;

    let state = AppState {
        config,
        storage,
        hasher,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server);

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the storage backend
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        "Starting users API with graceful shutdown ({:?} timeout)",
        SHUTDOWN_TIMEOUT
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, SHUTDOWN_TIMEOUT, async move {
        if let Storage::Postgres(db) = state.storage {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
