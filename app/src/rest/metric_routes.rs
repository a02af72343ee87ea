use crate::ingest::IngestService;
use crate::store::ReadingStore;
use std::sync::Arc;
use warp::Filter;

pub fn routes<S: ReadingStore>(
    service: &Arc<IngestService<S>>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(service.clone())
}

fn health<S: ReadingStore>(
    service: Arc<IngestService<S>>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || service.clone())
        .and(warp::path!("api" / "health"))
        .and(warp::get())
        .and_then(|service: Arc<IngestService<S>>| async move {
            let report = service.health().await;
            let ret = dto::HealthyDto {
                healthy: report.healthy,
                database_state: report.database_state,
                reading_count: report.reading_count,
            };
            Ok::<_, warp::Rejection>(warp::reply::json(&ret))
        })
        .boxed()
}

mod dto {
    use serde::Serialize;
    #[derive(Debug, Serialize)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub database_state: String,
        pub reading_count: Option<i64>,
    }
}
