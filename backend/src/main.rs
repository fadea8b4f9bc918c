//! Server entry point: opens the store, optionally bulk loads the CSV
//! sources, then serves the report API.

mod server;

use std::future;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodshare::domain::BulkLoadService;
use foodshare::domain::ports::BulkLoadCommand;
use foodshare::inbound::http::health::HealthState;
use foodshare::outbound::csv_source::CsvTableSource;
use foodshare::outbound::persistence::{
    DbPool, DieselBulkLoadRepository, PoolConfig, run_migrations,
};

use server::{AppSettings, ServerConfig, StoreState, create_server, drain_on};

/// Run migrations then build the pool; either failure degrades the server.
async fn open_store(settings: &AppSettings) -> StoreState {
    let database_url = settings.database_url();
    if let Err(err) = run_migrations(database_url).await {
        warn!(error = %err, database_url, "store unavailable; serving degraded");
        return StoreState::Unavailable(err.to_string());
    }
    let config = PoolConfig::new(database_url).with_max_size(settings.pool_size());
    match DbPool::new(config).await {
        Ok(pool) => StoreState::Ready(pool),
        Err(err) => {
            warn!(error = %err, database_url, "store unavailable; serving degraded");
            StoreState::Unavailable(err.to_string())
        }
    }
}

async fn load_on_startup(settings: &AppSettings, pool: &DbPool) {
    let data_dir = settings.data_dir();
    let source = match CsvTableSource::open(&data_dir) {
        Ok(source) => source,
        Err(err) => {
            warn!(error = %err, data_dir = %data_dir.display(), "skipping startup load");
            return;
        }
    };
    let loader = BulkLoadService::new(
        Arc::new(source),
        Arc::new(DieselBulkLoadRepository::new(pool.clone())),
    );
    let report = loader.load_all().await;
    if report.has_failures() {
        error!(?report, "startup load finished with failures");
    } else {
        info!(?report, "startup load finished");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let store = open_store(&settings).await;
    if let (true, StoreState::Ready(pool)) = (settings.load_on_startup, &store) {
        load_on_startup(&settings, pool).await;
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr(), store),
    )?;
    actix_web::rt::spawn(drain_on(server.handle(), health_state, interrupted()));
    server.await
}

/// Resolves on Ctrl-C. If the listener cannot be installed the server keeps
/// Actix's own signal handling and this never resolves.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for interrupts");
        future::pending::<()>().await;
    }
}
