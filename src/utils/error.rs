use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    StatusError { url: String, status: u16 },

    #[error("Empty response body from {url}")]
    EmptyBody { url: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PortfolioError {
    /// Whether this error came back from a remote source rather than from
    /// reading local files or building the request.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            PortfolioError::HttpError(_)
                | PortfolioError::StatusError { .. }
                | PortfolioError::EmptyBody { .. }
                | PortfolioError::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
