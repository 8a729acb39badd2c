//! Multipart HTTP transport for candidate submissions.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    error::SubmissionError,
    protocol::{part_kind, CandidatePayload, PartKind, PartValue, PayloadPart},
};
use url::Url;

use crate::CandidateSubmitter;

pub struct HttpCandidateSubmitter {
    http: Client,
    endpoint: Url,
}

impl HttpCandidateSubmitter {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

fn check_part(part: &PayloadPart, seen_binary: &mut Vec<String>) -> Result<(), SubmissionError> {
    let invalid = |message: &str| SubmissionError::InvalidPart {
        part: part.name.clone(),
        message: message.to_string(),
    };

    let kind = part_kind(&part.name).ok_or_else(|| invalid("not a candidate form part"))?;
    let is_file = matches!(part.value, PartValue::File(_));
    if kind.is_binary() != is_file {
        return Err(invalid(if is_file {
            "expected a text value"
        } else {
            "expected a file"
        }));
    }
    if kind == PartKind::Binary {
        if seen_binary.contains(&part.name) {
            return Err(invalid("sent more than once"));
        }
        seen_binary.push(part.name.clone());
    }
    Ok(())
}

/// Encode the payload, refusing any part whose name or value kind the candidate schema
/// does not allow.
pub fn multipart_form(payload: CandidatePayload) -> Result<Form, SubmissionError> {
    let mut form = Form::new();
    let mut seen_binary = Vec::new();
    for part in payload.into_parts() {
        check_part(&part, &mut seen_binary)?;
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File(file) => {
                let mut body = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(mime_type) = file.mime_type {
                    body = body
                        .mime_str(&mime_type)
                        .map_err(|err| SubmissionError::InvalidPart {
                            part: part.name.clone(),
                            message: err.to_string(),
                        })?;
                }
                form.part(part.name, body)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl CandidateSubmitter for HttpCandidateSubmitter {
    async fn submit(&self, payload: CandidatePayload) -> Result<(), SubmissionError> {
        let form = multipart_form(payload)?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| SubmissionError::transport(err.to_string()))?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(SubmissionError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }
}
