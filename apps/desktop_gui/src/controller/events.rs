//! Backend-to-UI events and error modeling for the candidate form.

use client_core::Acknowledgment;

pub enum UiEvent {
    SubmissionFinished(Acknowledgment),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Attachment,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Dispatch,
    PickFile,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let category = match context {
            UiErrorContext::PickFile => UiErrorCategory::Attachment,
            UiErrorContext::Dispatch => UiErrorCategory::Transport,
            UiErrorContext::BackendStartup => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Transport => "Connection",
            UiErrorCategory::Attachment => "File",
            UiErrorCategory::Unknown => "Unexpected",
        };
        format!("{label} error: {}", self.message)
    }
}
