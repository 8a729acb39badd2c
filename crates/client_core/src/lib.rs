use async_trait::async_trait;
use chrono::NaiveDate;
use form_core::FormState;
use shared::{error::SubmissionError, protocol::CandidatePayload};
use tracing::{error, info};

pub mod transport;
pub use transport::{multipart_form, HttpCandidateSubmitter};

pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";
pub const FAILED_MESSAGE: &str = "Error submitting form. Please try again.";

/// Sends one candidate payload. `Ok` means the server answered `201 Created`.
#[async_trait]
pub trait CandidateSubmitter: Send + Sync {
    async fn submit(&self, payload: CandidatePayload) -> Result<(), SubmissionError>;
}

/// What the user is told once a request has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    Submitted,
    Failed,
}

impl Acknowledgment {
    pub fn message(self) -> &'static str {
        match self {
            Acknowledgment::Submitted => SUBMITTED_MESSAGE,
            Acknowledgment::Failed => FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent.
    Rejected,
    Acknowledged(Acknowledgment),
}

/// Post one payload and fold the result into an acknowledgment. Failures are logged and
/// never surface their detail to the user.
pub async fn send_payload<S>(submitter: &S, payload: CandidatePayload) -> Acknowledgment
where
    S: CandidateSubmitter + ?Sized,
{
    info!(parts = payload.parts().len(), "submitting candidate form");
    match submitter.submit(payload).await {
        Ok(()) => Acknowledgment::Submitted,
        Err(err) => {
            error!(status = ?err.status(), "Error submitting form: {err}");
            Acknowledgment::Failed
        }
    }
}

/// Validate the form and, if it passes, send exactly one request built from the state as
/// it is at this moment.
pub async fn submit_form<S>(
    submitter: &S,
    state: FormState,
    today: NaiveDate,
) -> (FormState, SubmissionOutcome)
where
    S: CandidateSubmitter + ?Sized,
{
    let (state, payload) = state.prepare_submission(today);
    let Some(payload) = payload else {
        return (state, SubmissionOutcome::Rejected);
    };

    let acknowledgment = send_payload(submitter, payload).await;
    (state, SubmissionOutcome::Acknowledged(acknowledgment))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
