//! Service entry-point: loads settings, builds the database pool and serves
//! the customer endpoints until a shutdown signal arrives.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use clientes::inbound::http::health::HealthState;
use clientes::outbound::persistence::DbPool;
use clientes::settings::AppSettings;
use server::{ServerConfig, create_server, shutdown_on_signal};

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

    let settings = AppSettings::load().map_err(|e| {
        std::io::Error::other(format!("failed to load settings: {e}"))
    })?;
    let pool_config = settings
        .pool_config()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr(), pool.clone()),
    )?;
    let shutdown = actix_web::rt::spawn(shutdown_on_signal(server.handle(), health_state));

    let result = server.await;
    shutdown.abort();

    let (open, idle) = pool.connections();
    info!(open, idle, "server stopped; releasing database pool");
    drop(pool);
    result
}
