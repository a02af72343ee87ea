use super::{body, build_response, RestOptions};
use crate::error::ApiError;
use crate::ingest::IngestService;
use crate::store::ReadingStore;
use hydrosys_core::error::ValidationError;
use std::sync::Arc;
use warp::http::Method;
use warp::hyper::body::Bytes;
use warp::Filter;

pub(crate) const UPLOAD_SUCCESS: &str = "Sensor data saved successfully";

pub fn routes<S: ReadingStore>(
    service: &Arc<IngestService<S>>,
    options: RestOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    ingest(service.clone(), options)
}

/// /ingest?action=:action
///
/// - POST `upload`: validate and store a reading, answers a `MessageDto`
/// - GET `latest_data`: the newest reading as `ReadingDto`
/// - GET `recent_data[&limit=n]`: the newest readings, newest first
///
/// Everything else is an invalid request
fn ingest<S: ReadingStore>(
    service: Arc<IngestService<S>>,
    options: RestOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("ingest"))
        .and(warp::method())
        .and(warp::query::<dto::IngestQuery>())
        .and(body::limited(options.max_body_bytes))
        .and_then(
            move |service: Arc<IngestService<S>>,
                  method: Method,
                  query: dto::IngestQuery,
                  body: Result<Bytes, ValidationError>| async move {
                let status_mode = options.status_mode;
                match (&method, query.action.as_deref()) {
                    (&Method::POST, Some("upload")) => {
                        let resp = match body {
                            Ok(body) => service.upload(&body).await,
                            Err(e) => Err(e.into()),
                        };
                        let resp = resp.map(|_| super::dto::MessageDto {
                            message: UPLOAD_SUCCESS.to_owned(),
                        });
                        build_response(resp, status_mode)
                    }
                    (&Method::GET, Some("latest_data")) => {
                        let resp = service.latest().await.map(dto::ReadingDto::from);
                        build_response(resp, status_mode)
                    }
                    (&Method::GET, Some("recent_data")) => {
                        let limit = query
                            .limit
                            .unwrap_or(options.recent_limit)
                            .clamp(1, options.recent_limit);
                        let resp = service.recent(limit).await.map(|rows| {
                            rows.into_iter()
                                .map(dto::ReadingDto::from)
                                .collect::<Vec<_>>()
                        });
                        build_response(resp, status_mode)
                    }
                    _ => build_response::<()>(Err(ApiError::InvalidRequest), status_mode),
                }
            },
        )
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use chrono::{DateTime, Utc};
    use hydrosys_core::RecordedReading;
    use serde::{Deserialize, Serialize, Serializer};

    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngestQuery {
        pub action: Option<String>,
        pub limit: Option<i64>,
    }

    /// Flat row layout the dashboard app reads
    #[derive(Debug, Serialize)]
    pub struct ReadingDto {
        pub air_temp: f64,
        pub humidity: f64,
        pub water_temp: f64,
        pub water_level: f64,
        pub ph: f64,
        pub tds: f64,
        #[serde(serialize_with = "serialize_timestamp")]
        pub timestamp: DateTime<Utc>,
    }

    impl From<RecordedReading> for ReadingDto {
        fn from(val: RecordedReading) -> Self {
            ReadingDto {
                air_temp: val.reading.air_temp,
                humidity: val.reading.humidity,
                water_temp: val.reading.water_temp,
                water_level: val.reading.water_level,
                ph: val.reading.ph,
                tds: val.reading.tds,
                timestamp: val.created_at,
            }
        }
    }

    fn serialize_timestamp<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }
}
