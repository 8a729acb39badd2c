use thiserror::Error;

/// Why a candidate submission did not end in `201 Created`.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("unexpected response status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("transport failure: {message}")]
    Transport { message: String },
    #[error("invalid multipart part '{part}': {message}")]
    InvalidPart { part: String, message: String },
}

impl SubmissionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}
