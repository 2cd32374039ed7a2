use std::path::Path;

mod backend_bridge;
mod controller;
mod ui;

use client_core::AnalyzeClient;
use crossbeam_channel::bounded;
use eframe::egui;
use form_controller::settings::{load_settings, Settings, DEFAULT_SETTINGS_FILE};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::AnalyzerApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = match load_settings(Path::new(DEFAULT_SETTINGS_FILE)) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("falling back to default settings: {err:#}");
            Settings::default()
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    match AnalyzeClient::new(&settings.server_url) {
        Ok(client) => backend_bridge::runtime::launch(client, cmd_rx, ui_tx),
        Err(err) => {
            tracing::error!("cannot start backend worker: {err}");
            let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                "Backend unavailable: {err}"
            )));
        }
    }

    let policy = settings.submit_policy;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Replay Analyzer")
            .with_inner_size([760.0, 720.0])
            .with_min_inner_size([620.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Replay Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(cmd_tx, ui_rx, policy)))),
    )
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use client_core::AnalyzeError;
    use crossbeam_channel::bounded;
    use form_controller::{DomEvent, DomHandles, FileList, FormController, PendingSubmission};
    use shared::domain::SelectedFile;

    use super::BackendCommand;
    use crate::backend_bridge::runtime::deliver;
    use crate::controller::events::UiEvent;
    use crate::controller::orchestration::dispatch_backend_command;
    use crate::ui::{app::human_readable_bytes, surface::GuiSurface};

    fn pending_submission() -> PendingSubmission {
        let handles = DomHandles::default();
        let mut controller = FormController::new(GuiSurface::default(), handles.clone());
        controller.dispatch(
            &handles.replay_zone,
            DomEvent::Drop(FileList::single(SelectedFile::new("a.osr", b"r".to_vec()))),
        );
        controller.dispatch(
            &handles.beatmap_zone,
            DomEvent::Drop(FileList::single(SelectedFile::new("a.osu", b"b".to_vec()))),
        );
        controller
            .dispatch(&handles.submit, DomEvent::Click)
            .submission
            .expect("pending submission")
    }

    #[test]
    fn formats_file_sizes_readably() {
        assert_eq!(human_readable_bytes(0), "0 B");
        assert_eq!(human_readable_bytes(1023), "1023 B");
        assert_eq!(human_readable_bytes(1024), "1 KB");
        assert_eq!(human_readable_bytes(1536), "1.5 KB");
        assert_eq!(human_readable_bytes(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn picker_requests_are_drained_once() {
        let handles = DomHandles::default();
        let mut controller = FormController::new(GuiSurface::default(), handles.clone());
        controller.dispatch(&handles.beatmap_zone, DomEvent::Click);

        let requests = controller.surface_mut().take_picker_requests();
        assert_eq!(requests, vec![handles.beatmap_input.clone()]);
        assert!(controller.surface_mut().take_picker_requests().is_empty());
    }

    #[test]
    fn queued_submission_is_left_to_the_worker() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        let mut status = String::new();

        let settled = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::Analyze(pending_submission()),
            &mut status,
        );
        assert!(settled.is_none());
        assert!(status.is_empty());
        assert!(cmd_rx.try_recv().is_ok());
    }

    #[test]
    fn unqueued_submission_settles_immediately() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
        drop(cmd_rx);
        let mut status = String::new();

        let settled = dispatch_backend_command(
            &cmd_tx,
            BackendCommand::Analyze(pending_submission()),
            &mut status,
        )
        .expect("settled");
        assert!(matches!(
            settled.outcome,
            Err(AnalyzeError::WorkerUnavailable(_))
        ));
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn settled_outcome_waits_for_a_full_ui_queue() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
        ui_tx
            .try_send(UiEvent::BackendFailed("earlier".into()))
            .expect("fill queue");

        let settled = pending_submission()
            .abandon(AnalyzeError::WorkerUnavailable("offline".into()));
        let ticket = settled.ticket;
        let sender = thread::spawn(move || deliver(&ui_tx, settled));

        thread::sleep(Duration::from_millis(50));
        assert!(matches!(ui_rx.recv(), Ok(UiEvent::BackendFailed(_))));
        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::AnalysisSettled(settled)) => assert_eq!(settled.ticket, ticket),
            other => panic!("expected settled analysis, got {other:?}"),
        }
        assert!(sender.join().expect("sender thread"));
    }

    #[test]
    fn settled_outcome_is_dropped_only_when_ui_is_gone() {
        let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
        drop(ui_rx);

        let settled = pending_submission()
            .abandon(AnalyzeError::WorkerUnavailable("offline".into()));
        assert!(!deliver(&ui_tx, settled));
    }
}
