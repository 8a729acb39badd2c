//! Backend commands queued from UI to backend worker.

use shared::protocol::CandidatePayload;

pub enum BackendCommand {
    /// Payload snapshotted at the moment Submit was clicked.
    SubmitCandidate { payload: CandidatePayload },
}
