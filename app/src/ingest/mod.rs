use crate::error::{ApiError, StoreError};
use crate::store::ReadingStore;
use hydrosys_core::error::ValidationError;
use hydrosys_core::{DevicePayload, Reading, RecordedReading};
use tracing::{debug, error, info, warn};

/// Validator in front of a `ReadingStore`
///
/// Holds no state between requests besides the store itself.
pub struct IngestService<S> {
    store: S,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub healthy: bool,
    pub database_state: String,
    pub reading_count: Option<i64>,
}

impl<S: ReadingStore> IngestService<S> {
    pub fn new(store: S) -> Self {
        IngestService { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates `body` and appends it, nothing is stored on a validation error
    pub async fn upload(&self, body: &[u8]) -> Result<RecordedReading, ApiError> {
        let reading = hydrosys_core::validate(body).map_err(|e| {
            warn!("Rejected upload: {}", e);
            e
        })?;

        match self.store.append(reading).await {
            Ok(recorded) => {
                info!(reading_id = recorded.id, "Stored reading");
                Ok(recorded)
            }
            Err(e) => {
                error!("Failed persisting reading: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn latest(&self) -> Result<RecordedReading, ApiError> {
        match self.store.fetch_latest().await {
            Ok(Some(recorded)) => Ok(recorded),
            Ok(None) => Err(ApiError::NoData),
            Err(e) => {
                error!("Failed fetching latest reading: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<RecordedReading>, ApiError> {
        self.store.fetch_recent(limit).await.map_err(|e| {
            error!("Failed fetching recent readings: {}", e);
            ApiError::from(e)
        })
    }

    /// Checks a device payload without storing it
    pub fn echo(&self, body: &[u8]) -> Result<Reading, ValidationError> {
        let res = hydrosys_core::validate_as::<DevicePayload>(body);
        match &res {
            Ok(_) => debug!("Echoed device payload"),
            Err(e) => warn!("Rejected device payload: {}", e),
        }
        res
    }

    pub async fn health(&self) -> HealthReport {
        match self.store.count().await {
            Ok(count) => HealthReport {
                healthy: true,
                database_state: "connected".to_owned(),
                reading_count: Some(count),
            },
            Err(StoreError::PersistenceFailed(detail)) => HealthReport {
                healthy: false,
                database_state: detail,
                reading_count: None,
            },
        }
    }
}

#[cfg(test)]
mod test;
