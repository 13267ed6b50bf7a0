//! Backend entry-point: loads configuration, initialises logging and serves
//! the site API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, SiteSettings, create_server};
use site_backend::inbound::http::health::HealthState;

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

    let settings = SiteSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = ServerConfig::from_settings(&settings)
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;
    if !settings.cookie_secure() {
        warn!("admin token cookie is not marked Secure");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
