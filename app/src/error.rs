use crate::config::ConfigError;
use hydrosys_core::error::ValidationError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{0}")]
    PersistenceFailed(std::string::String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::PersistenceFailed(err.to_string())
    }
}

impl StoreError {
    pub fn timeout(after: Duration) -> Self {
        StoreError::PersistenceFailed(format!("timed out after {}ms", after.as_millis()))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("No data found")]
    NoData,
    #[error("Invalid request")]
    InvalidRequest,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Database unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("Failed binding server: {0}")]
    Bind(#[from] warp::Error),
}
