use thiserror::Error;

/// Error type for everything around the parser: configuration, request
/// validation, provider calls and itinerary document checks.
///
/// Parsing itself never fails; see [`crate::parser::parse_itinerary`].
#[derive(Error, Debug)]
pub enum TripError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("No itinerary available: the provider returned no text")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TripError>;

impl TripError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            TripError::Http(err) => err.is_timeout() || err.is_connect(),
            TripError::Provider { status, .. } => *status >= 500,
            TripError::RateLimit { .. } => true,
            TripError::Timeout(_) => true,
            TripError::EmptyResponse => true,
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TripError::Config(_) => "CONFIG_ERROR",
            TripError::InvalidRequest(_) => "INVALID_REQUEST",
            TripError::Http(_) => "HTTP_ERROR",
            TripError::Provider { .. } => "PROVIDER_ERROR",
            TripError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            TripError::Timeout(_) => "TIMEOUT_ERROR",
            TripError::EmptyResponse => "EMPTY_RESPONSE",
            TripError::Serialization(_) => "SERIALIZATION_ERROR",
            TripError::Validation(_) => "VALIDATION_ERROR",
            TripError::Io(_) => "IO_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}
