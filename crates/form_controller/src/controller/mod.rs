//! Controller layer: routes surface events through the registration table,
//! keeps the slot state and the surface consistent, and drives submissions.

pub mod events;
pub mod orchestration;

use shared::{domain::SlotKind, protocol::AnalyzeResponse};
use tracing::{debug, error, info, warn};

use crate::{
    registry::{Handler, Registry},
    render::render_result,
    slots::FileSlots,
    surface::{
        DisplaySurface, DomEvent, DomHandles, ElementId, FileList, DRAG_OVER_CLASS,
        HAS_FILE_CLASS, HIDDEN_CLASS,
    },
};
use events::{SubmitOutcome, UiError};
use orchestration::{PendingSubmission, SettledSubmission, SubmissionTicket, SubmitPolicy};

#[derive(Debug, Clone)]
pub struct UiState {
    slots: FileSlots,
    submit_enabled: bool,
    loading_visible: bool,
    results_visible: bool,
    in_flight: usize,
    next_ticket: u64,
}

impl UiState {
    fn new(handles: &DomHandles) -> Self {
        Self {
            slots: FileSlots::from_handles(handles),
            submit_enabled: false,
            loading_visible: false,
            results_visible: false,
            in_flight: 0,
            next_ticket: 1,
        }
    }

    pub fn slots(&self) -> &FileSlots {
        &self.slots
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// What happened to one dispatched event.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub handler: Option<Handler>,
    pub default_prevented: bool,
    pub submission: Option<PendingSubmission>,
    pub rejected: Option<UiError>,
}

impl Dispatch {
    fn handled(handler: Handler) -> Self {
        Self {
            handler: Some(handler),
            default_prevented: handler.prevents_default(),
            ..Self::default()
        }
    }

    pub fn was_handled(&self) -> bool {
        self.handler.is_some()
    }
}

pub struct FormController<S> {
    surface: S,
    handles: DomHandles,
    registry: Registry,
    state: UiState,
    policy: SubmitPolicy,
}

impl<S: DisplaySurface> FormController<S> {
    pub fn new(surface: S, handles: DomHandles) -> Self {
        Self::with_policy(surface, handles, SubmitPolicy::default())
    }

    pub fn with_policy(mut surface: S, handles: DomHandles, policy: SubmitPolicy) -> Self {
        let mut registry = Registry::default();
        for slot in SlotKind::ALL {
            registry.bind_drop_zone(slot, handles.zone(slot), handles.input(slot));
        }
        registry.bind_submit(&handles.submit);

        surface.add_class(&handles.loading_indicator, HIDDEN_CLASS);
        surface.add_class(&handles.results, HIDDEN_CLASS);

        let state = UiState::new(&handles);
        let mut controller = Self {
            surface,
            handles,
            registry,
            state,
            policy,
        };
        // Inputs may already hold files, e.g. restored by the surface.
        for slot in SlotKind::ALL {
            let input = controller.handles.input(slot).clone();
            controller.on_file_assigned(&input);
        }
        controller
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn handles(&self) -> &DomHandles {
        &self.handles
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn dispatch(&mut self, element: &ElementId, event: DomEvent) -> Dispatch {
        let kind = event.kind();
        let Some(handler) = self.registry.handler_for(element, kind) else {
            debug!(element = %element, ?kind, "no handler registered for event");
            return Dispatch::default();
        };

        let mut dispatch = Dispatch::handled(handler);
        match handler {
            Handler::OpenPicker(slot) => {
                let input = self.handles.input(slot).clone();
                debug!(slot = %slot, input = %input, "opening file picker");
                self.surface.open_file_picker(&input);
            }
            Handler::MarkDragOver(slot) => self.set_drag_over(slot, true),
            Handler::ClearDragOver(slot) => self.set_drag_over(slot, false),
            Handler::DropFiles(slot) => {
                if let DomEvent::Drop(files) = event {
                    self.drop_files(slot, files);
                }
            }
            Handler::FileChanged(slot) => {
                let input = self.handles.input(slot).clone();
                self.on_file_assigned(&input);
            }
            Handler::Submit => match self.begin_submission() {
                Ok(submission) => dispatch.submission = submission,
                Err(err) => dispatch.rejected = Some(err),
            },
        }
        dispatch
    }

    /// Syncs the owning zone's marker with the input's contents, then
    /// re-evaluates readiness.
    pub fn on_file_assigned(&mut self, input: &ElementId) {
        let Some(slot) = self.handles.slot_for_input(input) else {
            warn!(input = %input, "file assigned to an input with no drop zone");
            return;
        };

        let file = self.surface.files(input).first().cloned();
        let zone = self.handles.zone(slot).clone();
        if file.is_some() {
            self.surface.add_class(&zone, HAS_FILE_CLASS);
        } else {
            self.surface.remove_class(&zone, HAS_FILE_CLASS);
        }
        info!(
            slot = %slot,
            file = file.as_ref().map(|f| f.name.as_str()).unwrap_or("<none>"),
            "file slot updated"
        );
        self.state.slots.get_mut(slot).set_file(file);

        self.recompute_readiness();
    }

    /// Enables submit iff both inputs hold a file. Idempotent.
    pub fn recompute_readiness(&mut self) -> bool {
        let ready = self.state.slots.both_present();
        self.surface.set_disabled(&self.handles.submit, !ready);
        self.state.submit_enabled = ready;
        ready
    }

    /// Applies a settled submission. The loading indicator is hidden whatever
    /// the outcome.
    pub fn finish_submission(&mut self, settled: SettledSubmission) -> SubmitOutcome {
        let SettledSubmission { ticket, outcome } = settled;
        self.state.in_flight = self.state.in_flight.saturating_sub(1);

        let result = match outcome {
            Ok(AnalyzeResponse::Success(stats)) => {
                info!(
                    ticket = %ticket,
                    total_presses = stats.total_presses,
                    "rendering analysis result"
                );
                render_result(&mut self.surface, &self.handles, &stats);
                self.state.results_visible = true;
                SubmitOutcome::Rendered(stats)
            }
            Ok(AnalyzeResponse::Failure(body)) => {
                warn!(ticket = %ticket, error = %body.error, "analysis rejected by server");
                let err = UiError::ApplicationError(body.error);
                self.surface.alert(err.user_message());
                SubmitOutcome::Failed(err)
            }
            Err(source) => {
                error!(ticket = %ticket, error = %source, "analysis request failed");
                let err = UiError::TransportFailure(source);
                self.surface.alert(err.user_message());
                SubmitOutcome::Failed(err)
            }
        };

        self.hide_loading();
        result
    }

    fn set_drag_over(&mut self, slot: SlotKind, drag_over: bool) {
        let zone = self.handles.zone(slot).clone();
        if drag_over {
            self.surface.add_class(&zone, DRAG_OVER_CLASS);
        } else {
            self.surface.remove_class(&zone, DRAG_OVER_CLASS);
        }
        self.state.slots.get_mut(slot).set_drag_over(drag_over);
    }

    fn drop_files(&mut self, slot: SlotKind, files: FileList) {
        self.set_drag_over(slot, false);
        if files.is_empty() {
            debug!(slot = %slot, "drop carried no files");
            return;
        }
        let input = self.handles.input(slot).clone();
        self.surface.assign_files(&input, files);
        self.on_file_assigned(&input);
    }

    fn begin_submission(&mut self) -> Result<Option<PendingSubmission>, UiError> {
        let Some(request) = self.state.slots.request() else {
            warn!("submit activated without both files");
            let err = UiError::UserInputIncomplete;
            self.surface.alert(err.user_message());
            return Err(err);
        };

        if self.state.in_flight > 0 {
            if self.policy == SubmitPolicy::SingleFlight {
                info!(
                    in_flight = self.state.in_flight,
                    "submission already pending; ignoring activation"
                );
                return Ok(None);
            }
            warn!(
                in_flight = self.state.in_flight,
                "starting a concurrent submission while another is pending"
            );
        }

        self.show_loading();
        self.hide_results();

        let ticket = SubmissionTicket(self.state.next_ticket);
        self.state.next_ticket += 1;
        self.state.in_flight += 1;
        info!(
            ticket = %ticket,
            replay = %request.replay.name,
            beatmap = %request.beatmap.name,
            "submission started"
        );
        Ok(Some(PendingSubmission::new(ticket, request)))
    }

    fn show_loading(&mut self) {
        self.surface
            .remove_class(&self.handles.loading_indicator, HIDDEN_CLASS);
        self.state.loading_visible = true;
    }

    fn hide_loading(&mut self) {
        self.surface
            .add_class(&self.handles.loading_indicator, HIDDEN_CLASS);
        self.state.loading_visible = false;
    }

    fn hide_results(&mut self) {
        self.surface.add_class(&self.handles.results, HIDDEN_CLASS);
        self.state.results_visible = false;
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
