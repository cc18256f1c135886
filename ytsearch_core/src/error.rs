// src/error.rs

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unrecognized filter: {0}")]
    UnrecognizedFilter(String),

    #[error("Payload marker not found in response")]
    PayloadMarkerAbsent,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Search unavailable after {attempts} attempts: {reason}")]
    SearchUnavailable { attempts: u32, reason: String },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    pub fn code_str(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "invalid_input",
            SearchError::UnrecognizedFilter(_) => "unrecognized_filter",
            SearchError::PayloadMarkerAbsent => "marker_absent",
            SearchError::MalformedPayload(_) => "malformed_payload",
            SearchError::HttpRequest(_) | SearchError::HttpStatus(_) => "upstream_error",
            SearchError::SearchUnavailable { .. } => "unavailable",
            SearchError::Cancelled => "cancelled",
            SearchError::Config(_) => "config_error",
            SearchError::Io(_) | SearchError::SerdeJson(_) => "internal_error",
        }
    }

    /// Errors the fetch loop absorbs and retries instead of returning.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SearchError::PayloadMarkerAbsent
                | SearchError::HttpRequest(_)
                | SearchError::HttpStatus(_)
        )
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        SearchError::Config(err.to_string())
    }
}
