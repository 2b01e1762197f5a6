use std::io::Write;
use std::time::Duration;

use agentchat::backend::{AgentBackend, BackendError, HttpBackend, NewAgent};
use agentchat::core::action::{AGENT_FAILED, Action, Effect, update};
use agentchat::core::agents::AgentStore;
use agentchat::core::dialog::Dialog;
use agentchat::core::notify::NotificationKind;
use agentchat::core::state::{App, DocumentsView};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header_exists, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(server.uri(), Duration::from_secs(5))
}

fn researcher() -> NewAgent {
    NewAgent::from_form("Researcher", "Finds things", "research, analysis")
}

/// Fill and submit the Add Agent dialog, returning the effect `update` asks for.
fn submit_agent_form(app: &mut App) -> Effect {
    update(app, Action::OpenAddAgent);
    let Some(Dialog::AddAgent(form)) = app.dialog.as_mut() else {
        panic!("Add Agent dialog should be open");
    };
    form.name = "Researcher".to_string();
    form.description = "Finds things".to_string();
    form.capabilities = "research, analysis".to_string();
    update(app, Action::SubmitDialog)
}

// ============================================================================
// POST /agents
// ============================================================================

#[tokio::test]
async fn test_create_agent_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents"))
        .and(body_json(json!({
            "name": "Researcher",
            "description": "Finds things",
            "capabilities": ["research", "analysis"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "a1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert_ok!(backend_for(&mock_server).create_agent(&researcher()).await);
}

#[tokio::test]
async fn test_create_agent_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(backend_for(&mock_server).create_agent(&researcher()).await);
    assert_eq!(
        err,
        BackendError::Status {
            status: 500,
            body: "database down".to_string()
        }
    );
}

#[tokio::test]
async fn test_create_agent_connection_refused() {
    // Nothing listens on port 9 locally.
    let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2));
    let result = backend.create_agent(&researcher()).await;
    assert!(matches!(result, Err(BackendError::Network(_))));
}

// ============================================================================
// POST /upload
// ============================================================================

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("meeting notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "document_id": "d-42",
            "filename": "notes.txt"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"meeting notes").unwrap();

    let receipt = assert_ok!(backend_for(&mock_server).upload_document(&file_path).await);
    assert_eq!(receipt.document_id.as_deref(), Some("d-42"));
}

#[tokio::test]
async fn test_upload_accepts_unexpected_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stored"))
        .mount(&mock_server)
        .await;

    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let receipt = backend_for(&mock_server)
        .upload_document(file.path())
        .await
        .unwrap();
    assert_eq!(receipt.document_id, None);
}

#[tokio::test]
async fn test_upload_missing_file_never_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let result = backend_for(&mock_server)
        .upload_document(&dir.path().join("gone.pdf"))
        .await;
    assert!(matches!(result, Err(BackendError::Io(_))));
}

// ============================================================================
// GET /documents
// ============================================================================

#[tokio::test]
async fn test_list_documents() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"filename": "a.pdf", "upload_date": "2024-05-01T10:00:00", "document_id": "1"},
            {"filename": "b.txt", "upload_date": "2024-05-02T11:30:00", "document_id": "2"}
        ])))
        .mount(&mock_server)
        .await;

    let documents = assert_ok!(backend_for(&mock_server).list_documents().await);
    let names: Vec<_> = documents.iter().map(|d| d.filename.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.txt"]);
}

#[tokio::test]
async fn test_list_documents_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server).list_documents().await;
    assert!(matches!(result, Err(BackendError::Parse(_))));
}

// ============================================================================
// Dialog flows against a live mock
// ============================================================================

#[tokio::test]
async fn test_failed_create_keeps_dialog_open_and_agents_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut app = App::new(AgentStore::default(), mock_server.uri());
    let agents_before = app.agents.agents().to_vec();

    let Effect::CreateAgent(request) = submit_agent_form(&mut app) else {
        panic!("submitting a complete form should request creation");
    };
    assert!(app.dialog.as_ref().is_some_and(Dialog::is_pending));

    let result = backend_for(&mock_server)
        .create_agent(&request)
        .await
        .map(|()| request);
    update(&mut app, Action::AgentCreated(result));

    assert_eq!(app.agents.agents(), agents_before.as_slice());
    let Some(Dialog::AddAgent(form)) = &app.dialog else {
        panic!("dialog should stay open after a failure");
    };
    assert!(!form.pending);
    assert_eq!(form.name, "Researcher");
    let notification = app.notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.body, AGENT_FAILED);
}

#[tokio::test]
async fn test_successful_create_closes_dialog() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let mut app = App::new(AgentStore::default(), mock_server.uri());
    let agent_count = app.agents.len();

    let Effect::CreateAgent(request) = submit_agent_form(&mut app) else {
        panic!("submitting a complete form should request creation");
    };
    let result = backend_for(&mock_server)
        .create_agent(&request)
        .await
        .map(|()| request);
    update(&mut app, Action::AgentCreated(result));

    assert!(app.dialog.is_none());
    assert_eq!(app.agents.len(), agent_count);
    assert_eq!(
        app.notification.as_ref().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[tokio::test]
async fn test_refresh_documents_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = App::new(AgentStore::default(), mock_server.uri());
    assert_eq!(update(&mut app, Action::RefreshDocuments), Effect::FetchDocuments);
    assert_eq!(app.documents, DocumentsView::Loading);

    let result = backend_for(&mock_server).list_documents().await;
    update(&mut app, Action::DocumentsLoaded(result));
    assert_eq!(app.documents, DocumentsView::Unavailable);
    assert!(app.notification.is_some());
}
