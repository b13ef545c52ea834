//! Exercise tracker entry-point: loads settings, opens the store and serves
//! the REST API.

mod server;

use std::ffi::OsString;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::startup::{
    ServerSettings, build_http_state, clear_store_on_startup, open_store,
};
use server::{ServerConfig, create_server};

fn bind_addr(settings: &ServerSettings) -> std::io::Result<SocketAddr> {
    let ip: IpAddr = settings.host().parse().map_err(|e| {
        std::io::Error::other(format!("invalid host {:?}: {e}", settings.host()))
    })?;
    Ok(SocketAddr::new(ip, settings.port()))
}

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

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = bind_addr(&settings)?;

    let store = open_store(&settings)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to open store: {e}")))?;
    if settings.clear_on_startup {
        clear_store_on_startup(&store).await;
    }

    let http_state = build_http_state(&store, Arc::new(DefaultClock));
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig {
        bind_addr,
        cors_allowed_origins: settings.cors_allowed_origins(),
    };
    let server = create_server(health_state, http_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
