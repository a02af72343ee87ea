use crate::error::StoreError;
use std::time::Duration;

// Queries are checked at runtime so the crate builds without a live
// DATABASE_URL.
macro_rules! sql_stmnt {
    ($ret:ident, $stmt:expr) => {
        sqlx::query_as::<_ ,$ret>($stmt)
    };
    ($ret:ident, $stmt:expr, $($bind:expr),*) => {
        sqlx::query_as::<_ ,$ret>($stmt)$(.bind($bind))*
    };
}

pub async fn establish_db_connection(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<sqlx::PgPool, StoreError> {
    Ok(sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?)
}

pub async fn check_schema(conn: &sqlx::PgPool) -> Result<(), StoreError> {
    sql_stmnt!(CountRecord, "SELECT count(*) as count FROM sensor_readings")
        .fetch_one(conn)
        .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
pub(crate) struct CountRecord {
    pub count: Option<i64>,
}

impl CountRecord {
    pub fn count(self) -> i64 {
        self.count.unwrap_or(0)
    }
}

pub mod sensor_reading;

#[cfg(test)]
mod test;
