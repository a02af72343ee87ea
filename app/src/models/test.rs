use hydrosys_core::{Reading, RecordedReading};
use std::time::Duration;

use super::sensor_reading;
use super::*;

// Runs against the database in DATABASE_URL, schema from database/schema.sql
async fn connect() -> sqlx::PgPool {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    establish_db_connection(&url, 2, Duration::from_secs(5))
        .await
        .unwrap()
}

fn reading(seed: f64) -> Reading {
    Reading {
        air_temp: seed,
        humidity: seed + 0.5,
        water_temp: -seed,
        water_level: seed * 2.0,
        ph: 6.8,
        tds: 450.0,
    }
}

#[tokio::test]
#[ignore = "needs a postgres instance"]
async fn test_db_schema() {
    let conn = connect().await;
    check_schema(&conn).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a postgres instance"]
async fn crud_sensor_readings() {
    let conn = connect().await;
    let before = sensor_reading::count(&conn).await.unwrap();

    // create
    let first: RecordedReading = sensor_reading::insert(&conn, &reading(1.25))
        .await
        .unwrap()
        .into();
    let second: RecordedReading = sensor_reading::insert(&conn, &reading(-7.125))
        .await
        .unwrap()
        .into();
    assert!(second.id > first.id);
    assert!(second.created_at >= first.created_at);
    assert_eq!(before + 2, sensor_reading::count(&conn).await.unwrap());

    // read
    let latest: RecordedReading = sensor_reading::get_latest(&conn)
        .await
        .unwrap()
        .unwrap()
        .into();
    assert!(latest.id >= second.id);

    let recent = sensor_reading::get_recent(&conn, 2).await.unwrap();
    assert_eq!(2, recent.len());
    assert!(recent[0].id > recent[1].id);
}
