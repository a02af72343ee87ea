use crate::error::StoreError;
use hydrosys_core::{Reading, RecordedReading};
use std::future::Future;

mod memory;
mod postgres;

pub use memory::MemoryReadingStore;
pub use postgres::PgReadingStore;

/// Append-only, ordered persistence of readings
///
/// Implementations assign `id` and `created_at` on `append`. The highest
/// `id` is the latest reading, equal timestamps do not matter.
pub trait ReadingStore: Send + Sync + 'static {
    /// Returns after the row is committed
    fn append(
        &self,
        reading: Reading,
    ) -> impl Future<Output = Result<RecordedReading, StoreError>> + Send;

    /// `None` on an empty store
    fn fetch_latest(
        &self,
    ) -> impl Future<Output = Result<Option<RecordedReading>, StoreError>> + Send;

    /// Up to `limit` readings, newest first
    fn fetch_recent(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<RecordedReading>, StoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send;
}
