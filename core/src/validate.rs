use crate::error::ValidationError;
use crate::{Reading, Schema, UploadPayload};
use serde_json::Value;

/// Validates an upload body in the canonical layout
pub fn validate(body: &[u8]) -> Result<Reading, ValidationError> {
    validate_as::<UploadPayload>(body)
}

/// Validates a raw body against the layout `S`.
///
/// The body has to be a JSON object. Arrays are refused here already,
/// otherwise serde would happily fill the struct positionally.
pub fn validate_as<S: Schema>(body: &[u8]) -> Result<Reading, ValidationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ValidationError::MalformedPayload(format!(
                "expected an object, got {}",
                kind(&other)
            )))
        }
    };

    let payload: S = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
    payload.into_reading()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
