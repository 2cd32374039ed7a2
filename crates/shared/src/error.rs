use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the analysis endpoint returns when it rejects the uploaded files.
///
/// The message is meant for the user and is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
