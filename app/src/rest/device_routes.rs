use super::{body, RestOptions};
use crate::config::StatusMode;
use crate::ingest::IngestService;
use crate::store::ReadingStore;
use hydrosys_core::error::ValidationError;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Reply};

pub fn routes<S: ReadingStore>(
    service: &Arc<IngestService<S>>,
    options: RestOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    device_upload(service.clone(), options)
}

/// POST /device/upload
///
/// Accepts the sensor-named payload of the ESP32 firmware, checks it and
/// echoes the values back. Nothing is stored.
fn device_upload<S: ReadingStore>(
    service: Arc<IngestService<S>>,
    options: RestOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("device" / "upload"))
        .and(warp::post())
        .and(body::limited(options.max_body_bytes))
        .map(
            move |service: Arc<IngestService<S>>, body: Result<Bytes, ValidationError>| {
                let resp = body.and_then(|body| service.echo(&body));
                echo_response(resp, options.status_mode)
            },
        )
        .boxed()
}

fn echo_response(
    resp: Result<hydrosys_core::Reading, ValidationError>,
    status_mode: StatusMode,
) -> warp::reply::Response {
    match resp {
        Ok(reading) => warp::reply::json(&dto::EchoDto {
            status: "success".to_owned(),
            message: "Data received successfully".to_owned(),
            data: reading.to_device_fields(),
        })
        .into_response(),
        Err(err) => {
            let message = match err {
                ValidationError::MalformedPayload(_) => "Invalid JSON data received",
                ValidationError::MissingField(_) => "Missing required sensor data",
            };
            let status = match status_mode {
                StatusMode::Legacy => StatusCode::OK,
                StatusMode::Semantic => StatusCode::BAD_REQUEST,
            };
            let body = dto::EchoErrorDto {
                status: "error".to_owned(),
                message: message.to_owned(),
            };
            warp::reply::with_status(warp::reply::json(&body), status).into_response()
        }
    }
}

///
/// DTO
///
pub mod dto {
    use hydrosys_core::DeviceFields;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EchoDto {
        pub status: String,
        pub message: String,
        pub data: DeviceFields,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EchoErrorDto {
        pub status: String,
        pub message: String,
    }
}
