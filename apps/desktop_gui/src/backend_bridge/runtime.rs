//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{send_payload, HttpCandidateSubmitter};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Start the submission worker on its own thread.
///
/// Each submission runs as an independent task, so a second click while a request is in
/// flight sends a second request.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, endpoint: Url) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("submission worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        tracing::info!(endpoint = %endpoint, "submission worker ready");
        let submitter = Arc::new(HttpCandidateSubmitter::new(endpoint));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::SubmitCandidate { payload } => {
                    let submitter = Arc::clone(&submitter);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let acknowledgment = send_payload(submitter.as_ref(), payload).await;
                        let _ = ui_tx.try_send(UiEvent::SubmissionFinished(acknowledgment));
                    });
                }
            }
        }

        tracing::debug!("ui command channel closed; submission worker exiting");
    });
}
