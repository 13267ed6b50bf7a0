//! Server construction.

mod config;

pub use config::{ServerConfig, SiteSettings};

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use site_backend::inbound::http::app::{AppDependencies, build_app};
use site_backend::inbound::http::health::HealthState;
use site_backend::inbound::http::state::{HttpState, HttpStatePorts};
use site_backend::outbound::memory::{
    MemoryAdminSessionStore, MemoryApplicationRepository, MemoryEnquiryRepository,
};

fn build_http_state(config: &ServerConfig) -> HttpState {
    let ports = HttpStatePorts {
        applications: Arc::new(MemoryApplicationRepository::new()),
        enquiries: Arc::new(MemoryEnquiryRepository::new()),
        sessions: Arc::new(MemoryAdminSessionStore::new(config.session_ttl)),
    };
    HttpState::new(ports, config.admin.clone()).with_cookie_secure(config.cookie_secure)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Stores are created once here and shared by every worker.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, cookie_secure = config.cookie_secure, "server listening");
    health_state.mark_ready();
    Ok(server)
}
