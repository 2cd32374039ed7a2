use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: StatusCode },
    #[error("malformed analysis response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("analysis worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl AnalyzeError {
    /// Whether the failure happened before a well-formed response arrived.
    pub fn is_transport(&self) -> bool {
        !matches!(self, AnalyzeError::InvalidServerUrl { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AnalyzeError::HttpStatus { status } => Some(*status),
            AnalyzeError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
