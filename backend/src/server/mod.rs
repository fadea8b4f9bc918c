//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::{ServerConfig, StoreState};
pub use settings::AppSettings;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use foodshare::Trace;
use foodshare::inbound::http::configure_api;
use foodshare::inbound::http::health::{HealthState, live, ready};
use foodshare::inbound::http::state::HttpState;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is only marked when the store opened; a degraded server stays
/// not-ready while still answering every route.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let store_ready = config.store_ready();
    let http_state = web::Data::new(build_http_state(&config.store));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    if store_ready {
        health_state.mark_ready();
        info!(addr = %config.bind_addr, "server listening");
    } else {
        warn!(addr = %config.bind_addr, "server listening without a store");
    }
    Ok(server)
}

/// Wait for `shutdown`, then fail liveness and stop `handle` gracefully so
/// in-flight requests finish while probes already report the drain.
pub async fn drain_on<F>(handle: ServerHandle, health_state: web::Data<HealthState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}
