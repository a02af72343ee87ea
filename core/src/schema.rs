use crate::error::ValidationError;
use crate::Reading;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A wire layout a sensor node may send its measurements in
///
/// Every field is decoded as an `Option`, so missing and explicit `null`
/// values end up the same. `into_reading` checks them in the order the
/// layout lists them and stops at the first gap.
pub trait Schema: DeserializeOwned {
    fn into_reading(self) -> Result<Reading, ValidationError>;
}

fn required(value: Option<f64>, name: &'static str) -> Result<f64, ValidationError> {
    value.ok_or(ValidationError::MissingField(name))
}

/// Payload of `POST /ingest?action=upload`
#[derive(Debug, Deserialize)]
pub struct UploadPayload {
    pub air_temp: Option<f64>,
    pub humidity: Option<f64>,
    pub water_temp: Option<f64>,
    pub water_level: Option<f64>,
    pub ph: Option<f64>,
    pub tds: Option<f64>,
}

impl Schema for UploadPayload {
    fn into_reading(self) -> Result<Reading, ValidationError> {
        Ok(Reading {
            air_temp: required(self.air_temp, "air_temp")?,
            humidity: required(self.humidity, "humidity")?,
            water_temp: required(self.water_temp, "water_temp")?,
            water_level: required(self.water_level, "water_level")?,
            ph: required(self.ph, "ph")?,
            tds: required(self.tds, "tds")?,
        })
    }
}

/// Payload sent by the ESP32 firmware, named after the sensors
#[derive(Debug, Deserialize)]
pub struct DevicePayload {
    pub dht22_temperature: Option<f64>,
    pub dht22_humidity: Option<f64>,
    pub ultrasonic_distance: Option<f64>,
    pub ph_value: Option<f64>,
    pub tds_value: Option<f64>,
    pub ds18b20_temperature: Option<f64>,
}

impl Schema for DevicePayload {
    fn into_reading(self) -> Result<Reading, ValidationError> {
        // Field order differs from the reading layout, the firmware
        // reports the sensors in this sequence.
        let air_temp = required(self.dht22_temperature, "dht22_temperature")?;
        let humidity = required(self.dht22_humidity, "dht22_humidity")?;
        let water_level = required(self.ultrasonic_distance, "ultrasonic_distance")?;
        let ph = required(self.ph_value, "ph_value")?;
        let tds = required(self.tds_value, "tds_value")?;
        let water_temp = required(self.ds18b20_temperature, "ds18b20_temperature")?;
        Ok(Reading {
            air_temp,
            humidity,
            water_temp,
            water_level,
            ph,
            tds,
        })
    }
}

/// Device field names with every sensor present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceFields {
    pub dht22_temperature: f64,
    pub dht22_humidity: f64,
    pub ultrasonic_distance: f64,
    pub ph_value: f64,
    pub tds_value: f64,
    pub ds18b20_temperature: f64,
}

impl Reading {
    pub fn to_device_fields(&self) -> DeviceFields {
        DeviceFields {
            dht22_temperature: self.air_temp,
            dht22_humidity: self.humidity,
            ultrasonic_distance: self.water_level,
            ph_value: self.ph,
            tds_value: self.tds,
            ds18b20_temperature: self.water_temp,
        }
    }
}
