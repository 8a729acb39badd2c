use super::*;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{extract::Multipart, extract::State, http::StatusCode, routing::post, Router};
use form_core::{reduce, FormAction};
use shared::{
    domain::{Attachment, CandidateProfile, DocumentEntry, FileType},
    protocol::{PartValue, CANDIDATE_ENDPOINT_PATH, DOCUMENTS_PART, PROFILE_PHOTO_PART},
};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<Vec<ReceivedPart>>>>,
}

async fn record_candidate(State(state): State<ServerState>, mut multipart: Multipart) -> StatusCode {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            bytes,
        });
    }
    state.requests.lock().await.push(parts);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    state.status
}

async fn spawn_candidate_server(
    status: StatusCode,
    delay: Option<Duration>,
) -> (Url, Arc<Mutex<Vec<Vec<ReceivedPart>>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        delay,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route(CANDIDATE_ENDPOINT_PATH, post(record_candidate))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let endpoint =
        Url::parse(&format!("http://{addr}{CANDIDATE_ENDPOINT_PATH}")).expect("endpoint url");
    (endpoint, requests)
}

struct CountingSubmitter {
    calls: AtomicUsize,
}

#[async_trait]
impl CandidateSubmitter for CountingSubmitter {
    async fn submit(&self, _payload: CandidatePayload) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
}

fn valid_profile() -> CandidateProfile {
    CandidateProfile {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@example.com".into(),
        dob: "1990-05-20".into(),
        residential_street1: "1 Main St".into(),
        residential_street2: "Springfield".into(),
        same_as_residential: false,
        permanent_street1: "2 Side St".into(),
        permanent_street2: "Shelbyville".into(),
        profile_photo: Some(Attachment::new("me.png", vec![0x89, 0x50]).with_mime_type("image/png")),
    }
}

fn row(file_type: FileType, file: Option<Attachment>) -> DocumentEntry {
    let mut entry = DocumentEntry::empty();
    entry.file_type = file_type;
    entry.file = file;
    entry
}

fn two_filed_rows() -> Vec<DocumentEntry> {
    vec![
        row(
            FileType::Pdf,
            Some(Attachment::new("cv.pdf", b"%PDF-1.7".to_vec()).with_mime_type("application/pdf")),
        ),
        row(FileType::Image, Some(Attachment::new("id.jpg", vec![0xff, 0xd8]))),
    ]
}

#[tokio::test]
async fn valid_form_posts_one_multipart_request() {
    let (endpoint, requests) = spawn_candidate_server(StatusCode::CREATED, None).await;
    let submitter = HttpCandidateSubmitter::new(endpoint);
    let state = FormState::new(valid_profile(), two_filed_rows());

    let (state, outcome) = submit_form(&submitter, state, today()).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Acknowledged(Acknowledgment::Submitted)
    );
    assert!(state.errors.is_empty());

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1);
    let parts = &requests[0];

    let text = |name: &str| {
        parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| String::from_utf8_lossy(&part.bytes).into_owned())
    };
    assert_eq!(text("firstName").as_deref(), Some("Jane"));
    assert_eq!(text("sameAsResidential").as_deref(), Some("false"));
    assert_eq!(text("permanentStreet2").as_deref(), Some("Shelbyville"));

    let photo: Vec<_> = parts.iter().filter(|p| p.name == PROFILE_PHOTO_PART).collect();
    assert_eq!(photo.len(), 1);
    assert_eq!(photo[0].file_name.as_deref(), Some("me.png"));

    let documents: Vec<_> = parts
        .iter()
        .filter(|p| p.name == DOCUMENTS_PART)
        .map(|p| p.file_name.clone().unwrap_or_default())
        .collect();
    assert_eq!(documents, vec!["cv.pdf", "id.jpg"]);
}

#[tokio::test]
async fn row_without_file_contributes_no_documents_part() {
    let (endpoint, requests) = spawn_candidate_server(StatusCode::CREATED, None).await;
    let submitter = HttpCandidateSubmitter::new(endpoint);
    let mut documents = two_filed_rows();
    documents[1].file = None;
    let state = FormState::new(valid_profile(), documents);

    let (_, outcome) = submit_form(&submitter, state, today()).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Acknowledged(Acknowledgment::Submitted)
    );
    let requests = requests.lock().await;
    let document_parts = requests[0]
        .iter()
        .filter(|p| p.name == DOCUMENTS_PART)
        .count();
    assert_eq!(document_parts, 1);
}

#[tokio::test]
async fn absent_profile_photo_is_not_sent() {
    let (endpoint, requests) = spawn_candidate_server(StatusCode::CREATED, None).await;
    let submitter = HttpCandidateSubmitter::new(endpoint);
    let profile = CandidateProfile {
        profile_photo: None,
        ..valid_profile()
    };

    submit_form(&submitter, FormState::new(profile, two_filed_rows()), today()).await;

    let requests = requests.lock().await;
    assert!(requests[0].iter().all(|p| p.name != PROFILE_PHOTO_PART));
}

#[tokio::test]
async fn invalid_form_is_rejected_without_a_request() {
    let submitter = CountingSubmitter {
        calls: AtomicUsize::new(0),
    };
    let state = reduce(FormState::default(), FormAction::AddRow);

    let (state, outcome) = submit_form(&submitter, state, today()).await;

    assert_eq!(outcome, SubmissionOutcome::Rejected);
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
    assert!(state.errors.contains("firstName"));
}

#[tokio::test]
async fn repeated_submits_each_send_a_request() {
    let submitter = CountingSubmitter {
        calls: AtomicUsize::new(0),
    };
    let state = FormState::new(valid_profile(), two_filed_rows());

    let (state, _) = submit_form(&submitter, state, today()).await;
    let (_, _) = submit_form(&submitter, state, today()).await;

    assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn server_error_yields_generic_failure() {
    let (endpoint, requests) =
        spawn_candidate_server(StatusCode::INTERNAL_SERVER_ERROR, None).await;
    let submitter = HttpCandidateSubmitter::new(endpoint);

    let (_, outcome) = submit_form(
        &submitter,
        FormState::new(valid_profile(), two_filed_rows()),
        today(),
    )
    .await;

    assert_eq!(outcome, SubmissionOutcome::Acknowledged(Acknowledgment::Failed));
    assert_eq!(requests.lock().await.len(), 1);
}

#[tokio::test]
async fn success_status_other_than_created_is_a_failure() {
    let (endpoint, _requests) = spawn_candidate_server(StatusCode::OK, None).await;
    let submitter = HttpCandidateSubmitter::new(endpoint);

    let err = submitter
        .submit(FormState::new(valid_profile(), two_filed_rows()).payload())
        .await
        .expect_err("200 is not 201");
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn timeout_yields_generic_failure() {
    let (endpoint, _requests) =
        spawn_candidate_server(StatusCode::CREATED, Some(Duration::from_secs(2))).await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("client");
    let submitter = HttpCandidateSubmitter::with_client(http, endpoint);

    let ack = send_payload(
        &submitter,
        FormState::new(valid_profile(), two_filed_rows()).payload(),
    )
    .await;

    assert_eq!(ack, Acknowledgment::Failed);
    assert_eq!(ack.message(), FAILED_MESSAGE);
}

#[tokio::test]
async fn unreachable_server_yields_generic_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let endpoint = Url::parse(&format!("http://{addr}{CANDIDATE_ENDPOINT_PATH}")).expect("url");
    let submitter = HttpCandidateSubmitter::new(endpoint);

    let ack = send_payload(
        &submitter,
        FormState::new(valid_profile(), two_filed_rows()).payload(),
    )
    .await;

    assert_eq!(ack, Acknowledgment::Failed);
}

#[test]
fn invalid_mime_type_is_reported_per_part() {
    let mut documents = two_filed_rows();
    documents[0].file = Some(Attachment::new("cv.pdf", vec![1]).with_mime_type("not a mime"));
    let payload = FormState::new(valid_profile(), documents).payload();

    let err = multipart_form(payload).expect_err("bad mime");
    assert!(matches!(err, SubmissionError::InvalidPart { ref part, .. } if part == DOCUMENTS_PART));
}

#[test]
fn acknowledgment_messages() {
    assert_eq!(Acknowledgment::Submitted.message(), "Form submitted successfully!");
    assert_eq!(
        Acknowledgment::Failed.message(),
        "Error submitting form. Please try again."
    );
}

fn invalid_part_name(payload: CandidatePayload) -> String {
    match multipart_form(payload).expect_err("schema violation") {
        SubmissionError::InvalidPart { part, .. } => part,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn encoder_rejects_parts_outside_the_schema() {
    let mut payload = FormState::new(valid_profile(), two_filed_rows()).payload();
    payload.push("nickname", PartValue::Text("JD".into()));

    assert_eq!(invalid_part_name(payload), "nickname");
}

#[test]
fn encoder_rejects_value_kind_mismatches() {
    let mut text_as_file = CandidatePayload::default();
    text_as_file.push("email", PartValue::File(Attachment::new("mail.txt", vec![1])));
    assert_eq!(invalid_part_name(text_as_file), "email");

    let mut file_as_text = CandidatePayload::default();
    file_as_text.push(DOCUMENTS_PART, PartValue::Text("cv.pdf".into()));
    assert_eq!(invalid_part_name(file_as_text), DOCUMENTS_PART);
}

#[test]
fn encoder_allows_repeated_documents_but_a_single_photo() {
    let mut payload = CandidatePayload::default();
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        payload.push(DOCUMENTS_PART, PartValue::File(Attachment::new(name, vec![1])));
    }
    assert!(multipart_form(payload.clone()).is_ok());

    for name in ["me.png", "me-again.png"] {
        payload.push(PROFILE_PHOTO_PART, PartValue::File(Attachment::new(name, vec![1])));
    }
    assert_eq!(invalid_part_name(payload), PROFILE_PHOTO_PART);
}
