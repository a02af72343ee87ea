use chrono::{DateTime, Utc};

/// One validated set of the six cluster measurements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Air temperature in °C
    pub air_temp: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Water temperature in °C
    pub water_temp: f64,
    pub water_level: f64,
    pub ph: f64,
    /// Total dissolved solids
    pub tds: f64,
}

/// A reading after the store accepted it.
///
/// `id` is the insertion sequence number and decides which reading is the
/// latest, `created_at` is only informational.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedReading {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub reading: Reading,
}
