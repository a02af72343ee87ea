mod config;
mod error;
mod ingest;
mod logging;
mod models;
mod rest;
mod store;

use config::{Config, ConfigError, StoreBackend};
use error::StartupError;
use ingest::IngestService;
use rest::RestOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use store::{MemoryReadingStore, PgReadingStore, ReadingStore};
use tracing::warn;

#[tokio::main]
pub async fn main() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    logging::init(config.log_level());

    let options = RestOptions::from(&config);
    match config.store_backend() {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let store = PgReadingStore::connect(
                database_url,
                config.database_max_connections(),
                config.database_timeout(),
            )
            .await?;
            serve(store, options, config.bind_addr()).await
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store, readings are lost on restart");
            serve(MemoryReadingStore::new(), options, config.bind_addr()).await
        }
    }
}

async fn serve<S: ReadingStore>(
    store: S,
    options: RestOptions,
    bind_addr: SocketAddr,
) -> Result<(), StartupError> {
    let service = Arc::new(IngestService::new(store));
    rest::dispatch_server(service, options, bind_addr).await
}
