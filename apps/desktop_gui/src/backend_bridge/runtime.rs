//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{AnalyzeClient, AnalyzeError};
use crossbeam_channel::{Receiver, Sender};
use form_controller::SettledSubmission;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(client: AnalyzeClient, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                settle_without_worker(&cmd_rx, &ui_tx, &err.to_string());
                return;
            }
        };

        tracing::info!(endpoint = %client.endpoint(), "backend worker ready");
        let client = Arc::new(client);
        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend received command");
            match cmd {
                BackendCommand::Analyze(pending) => {
                    let client = Arc::clone(&client);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let settled = pending.send(client.as_ref()).await;
                        tokio::task::block_in_place(|| deliver(&ui_tx, settled));
                    });
                }
            }
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

/// Keeps the UI from waiting forever on submissions nobody will send.
fn settle_without_worker(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Analyze(pending) => {
                let settled = pending.abandon(AnalyzeError::WorkerUnavailable(reason.to_string()));
                deliver(ui_tx, settled);
            }
        }
    }
}

/// Waits for room in the UI queue. An outcome is only lost once the UI has
/// gone away.
pub(crate) fn deliver(ui_tx: &Sender<UiEvent>, settled: SettledSubmission) -> bool {
    let ticket = settled.ticket;
    match ui_tx.send(UiEvent::AnalysisSettled(settled)) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(ticket = %ticket, "ui event queue closed; dropping analysis outcome");
            false
        }
    }
}
