use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON format: {0}")]
    MalformedPayload(std::string::String),
    #[error("Missing or NULL value for '{0}'")]
    MissingField(&'static str),
}
