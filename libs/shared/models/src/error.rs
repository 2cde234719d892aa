use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Non-success HTTP status or a transport failure.
    #[error("{0}")]
    Network(String),

    /// A structured `error` field in an otherwise successful response.
    #[error("{0}")]
    Domain(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing page element: {0}")]
    MissingElement(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
