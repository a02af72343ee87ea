use crate::config::{Config, StatusMode};
use crate::error::{ApiError, StartupError};
use crate::ingest::IngestService;
use crate::store::ReadingStore;
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

mod body;
mod device_routes;
mod ingest_routes;
mod metric_routes;

#[derive(Debug, Clone, Copy)]
pub struct RestOptions {
    pub status_mode: StatusMode,
    pub max_body_bytes: usize,
    pub recent_limit: i64,
}

impl From<&Config> for RestOptions {
    fn from(config: &Config) -> Self {
        RestOptions {
            status_mode: config.status_mode(),
            max_body_bytes: config.max_body_bytes(),
            recent_limit: config.recent_limit(),
        }
    }
}

/// All endpoints, every rejection answered with the JSON error envelope
pub fn api<S: ReadingStore>(
    service: &Arc<IngestService<S>>,
    options: RestOptions,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let status_mode = options.status_mode;
    ingest_routes::routes(service, options)
        .or(device_routes::routes(service, options))
        .or(metric_routes::routes(service))
        .recover(move |err: Rejection| handle_rejection(err, status_mode))
}

pub async fn dispatch_server<S: ReadingStore>(
    service: Arc<IngestService<S>>,
    options: RestOptions,
    bind_addr: SocketAddr,
) -> Result<(), StartupError> {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_header("content-type");
    let routes = api(&service, options)
        .with(cors)
        .with(warp::trace::request());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed listening for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutting down webserver");
    };
    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(bind_addr, shutdown)?;

    info!("Starting webserver at: {}", addr);
    server.await;
    Ok(())
}

pub(crate) fn build_response<T: Serialize>(
    resp: Result<T, ApiError>,
    status_mode: StatusMode,
) -> Result<warp::reply::Response, Rejection> {
    match resp {
        Ok(data) => Ok(warp::reply::json(&data).into_response()),
        Err(err) => Ok(error_response(&err, status_mode)),
    }
}

fn error_response(err: &ApiError, status_mode: StatusMode) -> warp::reply::Response {
    let status = match (status_mode, err) {
        (StatusMode::Legacy, _) => StatusCode::OK,
        (StatusMode::Semantic, ApiError::Validation(_) | ApiError::InvalidRequest) => {
            StatusCode::BAD_REQUEST
        }
        (StatusMode::Semantic, ApiError::NoData) => StatusCode::NOT_FOUND,
        (StatusMode::Semantic, ApiError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = dto::ErrorDto {
        error: err.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

async fn handle_rejection(
    err: Rejection,
    status_mode: StatusMode,
) -> Result<warp::reply::Response, Infallible> {
    debug!("Rejected request: {:?}", err);
    let status = match status_mode {
        StatusMode::Legacy => StatusCode::OK,
        StatusMode::Semantic if err.is_not_found() => StatusCode::NOT_FOUND,
        StatusMode::Semantic => StatusCode::BAD_REQUEST,
    };
    let body = dto::ErrorDto {
        error: ApiError::InvalidRequest.to_string(),
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), status).into_response())
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorDto {
        pub error: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageDto {
        pub message: String,
    }
}
