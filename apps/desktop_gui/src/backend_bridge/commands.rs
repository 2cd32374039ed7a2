//! Backend commands queued from UI to backend worker.

use form_controller::PendingSubmission;

pub enum BackendCommand {
    Analyze(PendingSubmission),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Analyze(_) => "analyze",
        }
    }
}
