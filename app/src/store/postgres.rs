use super::ReadingStore;
use crate::error::StoreError;
use crate::models::{self, sensor_reading};
use hydrosys_core::{Reading, RecordedReading};
use sqlx::PgPool;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Readings in the `sensor_readings` table.
///
/// Each call borrows a pooled connection for exactly one statement and
/// gives up after `timeout`.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: PgPool,
    timeout: Duration,
}

impl Debug for PgReadingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgReadingStore")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PgReadingStore {
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = models::establish_db_connection(database_url, max_connections, timeout).await?;
        let store = PgReadingStore::new(pool, timeout);
        store.bounded(models::check_schema(&store.pool)).await?;
        info!(max_connections, "Connected to database");
        Ok(store)
    }

    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        PgReadingStore { pool, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(StoreError::timeout(self.timeout)),
        }
    }
}

impl ReadingStore for PgReadingStore {
    #[tracing::instrument(skip(reading))]
    async fn append(&self, reading: Reading) -> Result<RecordedReading, StoreError> {
        let dao = self
            .bounded(sensor_reading::insert(&self.pool, &reading))
            .await?;
        Ok(dao.into())
    }

    #[tracing::instrument]
    async fn fetch_latest(&self) -> Result<Option<RecordedReading>, StoreError> {
        let dao = self.bounded(sensor_reading::get_latest(&self.pool)).await?;
        Ok(dao.map(Into::into))
    }

    #[tracing::instrument]
    async fn fetch_recent(&self, limit: i64) -> Result<Vec<RecordedReading>, StoreError> {
        let daos = self
            .bounded(sensor_reading::get_recent(&self.pool, limit))
            .await?;
        Ok(daos.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument]
    async fn count(&self) -> Result<i64, StoreError> {
        self.bounded(sensor_reading::count(&self.pool)).await
    }
}
