use chrono::{DateTime, NaiveDateTime, Utc};
use hydrosys_core::{Reading, RecordedReading};

use crate::{error::StoreError, models::CountRecord};

#[derive(sqlx::FromRow)]
pub struct SensorReadingDao {
    pub(crate) id: i64,
    pub(crate) timestamp: NaiveDateTime,
    pub(crate) air_temp: f64,
    pub(crate) humidity: f64,
    pub(crate) water_temp: f64,
    pub(crate) water_level: f64,
    pub(crate) ph: f64,
    pub(crate) tds: f64,
}

impl From<SensorReadingDao> for RecordedReading {
    fn from(val: SensorReadingDao) -> Self {
        RecordedReading {
            id: val.id,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(val.timestamp, Utc),
            reading: Reading {
                air_temp: val.air_temp,
                humidity: val.humidity,
                water_temp: val.water_temp,
                water_level: val.water_level,
                ph: val.ph,
                tds: val.tds,
            },
        }
    }
}

/// Appends a row, id and timestamp come from the database
pub async fn insert(
    conn: &sqlx::PgPool,
    reading: &Reading,
) -> Result<SensorReadingDao, StoreError> {
    Ok(sql_stmnt!(
        SensorReadingDao,
        r#"INSERT INTO sensor_readings (air_temp, humidity, water_temp, water_level, ph, tds)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, timestamp, air_temp, humidity, water_temp, water_level, ph, tds"#,
        reading.air_temp,
        reading.humidity,
        reading.water_temp,
        reading.water_level,
        reading.ph,
        reading.tds
    )
    .fetch_one(conn)
    .await?)
}

// READ sensor_readings
pub async fn get_latest(conn: &sqlx::PgPool) -> Result<Option<SensorReadingDao>, StoreError> {
    Ok(sql_stmnt!(
        SensorReadingDao,
        r#"SELECT id, timestamp, air_temp, humidity, water_temp, water_level, ph, tds
            FROM sensor_readings
            ORDER BY id DESC LIMIT 1"#
    )
    .fetch_optional(conn)
    .await?)
}

pub async fn get_recent(
    conn: &sqlx::PgPool,
    limit: i64,
) -> Result<Vec<SensorReadingDao>, StoreError> {
    Ok(sql_stmnt!(
        SensorReadingDao,
        r#"SELECT id, timestamp, air_temp, humidity, water_temp, water_level, ph, tds
            FROM sensor_readings
            ORDER BY id DESC LIMIT $1"#,
        limit
    )
    .fetch_all(conn)
    .await?)
}

pub async fn count(conn: &sqlx::PgPool) -> Result<i64, StoreError> {
    let record = sql_stmnt!(CountRecord, "SELECT count(*) as count FROM sensor_readings")
        .fetch_one(conn)
        .await?;
    Ok(record.count())
}
