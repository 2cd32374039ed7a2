//! Command orchestration helpers from UI actions to backend command queue.

use client_core::AnalyzeError;
use crossbeam_channel::{Sender, TrySendError};
use form_controller::SettledSubmission;

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command for the backend worker. A submission that cannot be
/// queued is settled on the spot so the caller can clear its loading state.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Option<SettledSubmission> {
    let cmd_name = cmd.name();

    let (cmd, reason) = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return None;
        }
        Err(TrySendError::Full(cmd)) => (cmd, "UI command queue is full; please retry"),
        Err(TrySendError::Disconnected(cmd)) => (
            cmd,
            "Backend command processor disconnected (possible startup/runtime failure)",
        ),
    };

    *status = reason.to_string();
    tracing::warn!(command = cmd_name, "{reason}");
    match cmd {
        BackendCommand::Analyze(pending) => {
            Some(pending.abandon(AnalyzeError::WorkerUnavailable(reason.to_string())))
        }
    }
}
