//! Submission outcomes and the user-facing error taxonomy.

use client_core::AnalyzeError;
use shared::protocol::PressStatistics;
use thiserror::Error;

pub const INCOMPLETE_INPUT_MESSAGE: &str = "Please upload both replay and beatmap files.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while analyzing the replay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Application,
}

/// Why a submission attempt ended without rendering. Every variant is
/// terminal for that attempt; the user retries by submitting again.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Please upload both replay and beatmap files.")]
    UserInputIncomplete,
    #[error("analysis transport failure: {0}")]
    TransportFailure(#[source] AnalyzeError),
    #[error("analysis rejected: {0}")]
    ApplicationError(String),
}

impl UiError {
    pub fn category(&self) -> UiErrorCategory {
        match self {
            UiError::UserInputIncomplete => UiErrorCategory::Validation,
            UiError::TransportFailure(_) => UiErrorCategory::Transport,
            UiError::ApplicationError(_) => UiErrorCategory::Application,
        }
    }

    /// Text shown in the alert. Transport details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            UiError::UserInputIncomplete => INCOMPLETE_INPUT_MESSAGE,
            UiError::TransportFailure(_) => GENERIC_FAILURE_MESSAGE,
            UiError::ApplicationError(message) => message.as_str(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Rendered(PressStatistics),
    Failed(UiError),
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered(_))
    }

    pub fn error(&self) -> Option<&UiError> {
        match self {
            SubmitOutcome::Failed(err) => Some(err),
            SubmitOutcome::Rendered(_) => None,
        }
    }
}
