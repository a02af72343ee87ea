use super::ReadingStore;
use crate::error::StoreError;
use chrono::Utc;
use hydrosys_core::{Reading, RecordedReading};
use parking_lot::RwLock;

/// Process local store, lost on restart
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    rows: RwLock<Vec<RecordedReading>>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadingStore for MemoryReadingStore {
    async fn append(&self, reading: Reading) -> Result<RecordedReading, StoreError> {
        let mut rows = self.rows.write();
        let now = Utc::now();
        // The wall clock may step backwards, created_at must not
        let created_at = match rows.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        let recorded = RecordedReading {
            id: rows.len() as i64 + 1,
            created_at,
            reading,
        };
        rows.push(recorded.clone());
        Ok(recorded)
    }

    async fn fetch_latest(&self) -> Result<Option<RecordedReading>, StoreError> {
        Ok(self.rows.read().last().cloned())
    }

    async fn fetch_recent(&self, limit: i64) -> Result<Vec<RecordedReading>, StoreError> {
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self.rows.read().iter().rev().take(take).cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.read().len() as i64)
    }
}
