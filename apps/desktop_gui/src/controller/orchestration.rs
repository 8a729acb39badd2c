//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::SubmitCandidate { .. } => "submit_candidate",
    };

    let failure = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return;
        }
        Err(TrySendError::Full(_)) => "submission queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "submission worker disconnected (possible startup/runtime failure); restart the app"
        }
    };

    let err = UiError::from_message(UiErrorContext::Dispatch, failure);
    tracing::warn!(command = cmd_name, "{}", err.message());
    *status = err.status_line();
}
