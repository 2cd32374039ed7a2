//! Events flowing from the backend worker back to the UI thread.

use form_controller::SettledSubmission;

#[derive(Debug)]
pub enum UiEvent {
    AnalysisSettled(SettledSubmission),
    BackendFailed(String),
}
