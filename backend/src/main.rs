//! Company API entry-point: reads configuration, migrates the database, and
//! serves the REST endpoints.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use company_api::config::AppConfig;
use company_api::inbound::http::health::HealthState;
use company_api::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    info!(config = %config, "configuration loaded");

    let database_url = config.database.url().map_err(std::io::Error::other)?;
    run_migrations(database_url.clone())
        .await
        .map_err(std::io::Error::other)?;

    let pool_config =
        PoolConfig::new(database_url).with_max_size(config.database.pool_max_size);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(config.addr, pool))?;
    info!("listening");

    let result = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    result
}
