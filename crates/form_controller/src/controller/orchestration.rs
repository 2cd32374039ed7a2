//! The asynchronous half of a submission: from a pending request to a
//! settled outcome the controller can apply.

use std::{fmt, str::FromStr};

use client_core::{AnalyzeApi, AnalyzeError};
use serde::Deserialize;
use shared::protocol::{AnalysisRequest, AnalyzeResponse};

use super::{events::SubmitOutcome, FormController};
use crate::surface::{DisplaySurface, DomEvent, ElementId};

/// What to do when submit is activated while an earlier request is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Start another request; the submit action stays enabled while one is
    /// in flight.
    #[default]
    AllowConcurrent,
    /// Ignore activations until the pending request settles.
    SingleFlight,
}

impl FromStr for SubmitPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "allow_concurrent" => Ok(SubmitPolicy::AllowConcurrent),
            "single_flight" => Ok(SubmitPolicy::SingleFlight),
            other => Err(format!("unknown submit policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionTicket(pub u64);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A submission whose loading state is already shown but whose request has
/// not been sent yet.
#[derive(Debug)]
pub struct PendingSubmission {
    ticket: SubmissionTicket,
    request: AnalysisRequest,
}

impl PendingSubmission {
    pub(crate) fn new(ticket: SubmissionTicket, request: AnalysisRequest) -> Self {
        Self { ticket, request }
    }

    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    /// Runs the network round trip. The result goes back to the controller
    /// through [`FormController::finish_submission`].
    pub async fn send<A: AnalyzeApi + ?Sized>(self, api: &A) -> SettledSubmission {
        let outcome = api.analyze(self.request).await;
        SettledSubmission {
            ticket: self.ticket,
            outcome,
        }
    }

    /// Settles without a network call, e.g. when the worker that should have
    /// sent it is gone.
    pub fn abandon(self, error: AnalyzeError) -> SettledSubmission {
        SettledSubmission {
            ticket: self.ticket,
            outcome: Err(error),
        }
    }
}

#[derive(Debug)]
pub struct SettledSubmission {
    pub ticket: SubmissionTicket,
    pub outcome: Result<AnalyzeResponse, AnalyzeError>,
}

/// Dispatches one event and, when it starts a submission, awaits it and
/// applies the outcome before returning.
pub async fn dispatch_and_settle<S, A>(
    controller: &mut FormController<S>,
    api: &A,
    element: &ElementId,
    event: DomEvent,
) -> Option<SubmitOutcome>
where
    S: DisplaySurface,
    A: AnalyzeApi + ?Sized,
{
    let pending = controller.dispatch(element, event).submission?;
    let settled = pending.send(api).await;
    Some(controller.finish_submission(settled))
}
