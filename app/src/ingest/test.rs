use super::*;
use crate::store::MemoryReadingStore;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const UPLOAD: &[u8] =
    br#"{"air_temp":24.5,"humidity":60.1,"water_temp":22.0,"water_level":15.3,"ph":6.8,"tds":450}"#;

/// A store whose database is gone
struct FailingStore;

impl ReadingStore for FailingStore {
    fn append(
        &self,
        _reading: Reading,
    ) -> impl Future<Output = Result<RecordedReading, StoreError>> + Send {
        async { Err(StoreError::timeout(Duration::from_millis(50))) }
    }

    fn fetch_latest(
        &self,
    ) -> impl Future<Output = Result<Option<RecordedReading>, StoreError>> + Send {
        async { Err(StoreError::PersistenceFailed("connection refused".to_owned())) }
    }

    fn fetch_recent(
        &self,
        _limit: i64,
    ) -> impl Future<Output = Result<Vec<RecordedReading>, StoreError>> + Send {
        async { Err(StoreError::PersistenceFailed("connection refused".to_owned())) }
    }

    fn count(&self) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async { Err(StoreError::PersistenceFailed("connection refused".to_owned())) }
    }
}

#[tokio::test]
async fn test_upload_then_latest() {
    let service = IngestService::new(MemoryReadingStore::new());

    let stored = service.upload(UPLOAD).await.unwrap();
    let latest = service.latest().await.unwrap();

    assert_eq!(stored, latest);
    assert_eq!(24.5, latest.reading.air_temp);
    assert_eq!(450.0, latest.reading.tds);
}

#[tokio::test]
async fn test_rejected_upload_stores_nothing() {
    let service = IngestService::new(MemoryReadingStore::new());

    let res = service.upload(br#"{"air_temp":24.5,"humidity":60.1}"#).await;
    assert!(matches!(
        res,
        Err(ApiError::Validation(ValidationError::MissingField("water_temp")))
    ));

    let res = service.upload(b"[1, 2, 3, 4, 5, 6]").await;
    assert!(matches!(
        res,
        Err(ApiError::Validation(ValidationError::MalformedPayload(_)))
    ));

    assert_eq!(0, service.store().count().await.unwrap());
}

#[tokio::test]
async fn test_latest_on_empty_store() {
    let service = IngestService::new(MemoryReadingStore::new());

    assert!(matches!(service.latest().await, Err(ApiError::NoData)));
}

#[tokio::test]
async fn test_echo_never_persists() {
    let service = IngestService::new(MemoryReadingStore::new());
    let body = br#"{"dht22_temperature":25.1,"dht22_humidity":55.0,"ultrasonic_distance":12.4,
        "ph_value":7.1,"tds_value":380,"ds18b20_temperature":21.9}"#;

    let reading = service.echo(body).unwrap();

    assert_eq!(21.9, reading.water_temp);
    assert_eq!(0, service.store().count().await.unwrap());
}

#[tokio::test]
async fn test_store_failures() {
    let service = IngestService::new(FailingStore);

    let res = service.upload(UPLOAD).await;
    match res {
        Err(err @ ApiError::Store(_)) => {
            assert_eq!("Database error: timed out after 50ms", err.to_string())
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(service.latest().await, Err(ApiError::Store(_))));
    assert!(matches!(service.recent(5).await, Err(ApiError::Store(_))));

    let health = service.health().await;
    assert!(!health.healthy);
    assert_eq!("connection refused", health.database_state);
    assert_eq!(None, health.reading_count);
}

#[tokio::test]
async fn test_health() {
    let service = IngestService::new(MemoryReadingStore::new());
    service.upload(UPLOAD).await.unwrap();

    let health = service.health().await;

    assert!(health.healthy);
    assert_eq!(Some(1), health.reading_count);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads() {
    let service = Arc::new(IngestService::new(MemoryReadingStore::new()));
    let k = 32;

    let handles: Vec<_> = (0..k)
        .map(|i| {
            let service = service.clone();
            let seed = i as f64;
            let body = format!(
                r#"{{"air_temp":{},"humidity":{},"water_temp":{},"water_level":{},"ph":7.0,"tds":{}}}"#,
                seed,
                seed + 0.5,
                -seed,
                seed * 2.0,
                seed * 10.0
            );
            tokio::spawn(async move { service.upload(body.as_bytes()).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(k as i64, service.store().count().await.unwrap());
    let rows = service.recent(k as i64).await.unwrap();
    assert_eq!(k, rows.len());
    for row in rows {
        let seed = row.reading.air_temp;
        assert_eq!(seed + 0.5, row.reading.humidity);
        assert_eq!(-seed, row.reading.water_temp);
        assert_eq!(seed * 2.0, row.reading.water_level);
        assert_eq!(seed * 10.0, row.reading.tds);
    }
}
