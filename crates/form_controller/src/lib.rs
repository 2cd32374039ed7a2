//! Upload form controller for the replay analyzer.
//!
//! Two drop zones each proxy a file input. The controller keeps each zone's
//! `has-file` marker in step with its input, enables submit only while both
//! inputs hold a file, and turns a submit activation into a
//! [`PendingSubmission`] whose settled outcome is rendered back onto the
//! [`DisplaySurface`].

pub mod controller;
pub mod registry;
pub mod render;
pub mod settings;
pub mod slots;
pub mod surface;

pub use controller::{
    events::{SubmitOutcome, UiError, UiErrorCategory},
    orchestration::{
        dispatch_and_settle, PendingSubmission, SettledSubmission, SubmissionTicket,
        SubmitPolicy,
    },
    Dispatch, FormController, UiState,
};
pub use registry::{Handler, Registry};
pub use surface::{DisplaySurface, DomEvent, DomHandles, ElementId, EventKind, FileList};
