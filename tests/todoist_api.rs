use donelog::api::{RemoteSource, Todoist, TodoistConfig};
use donelog::libs::error::{RecordKind, RecordValidationError, TransportError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client(server: &MockServer) -> Todoist {
    Todoist::new(&TodoistConfig {
        api_token: TOKEN.to_string(),
        api_url: server.uri(),
    })
    .unwrap()
}

#[tokio::test]
async fn todoist_fetches_projects_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sync"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_partial_json(json!({ "sync_token": "*", "resource_types": ["projects"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sync_token": "abc",
            "projects": [
                { "id": "1", "name": "Work", "color": "red" },
                { "id": 2, "name": "Home" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client(&server).try_fetch_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    let first = projects[0].as_ref().unwrap();
    assert_eq!(first.remote_id, 1);
    assert_eq!(first.name, "Work");
    assert_eq!(projects[1].as_ref().unwrap().remote_id, 2);
}

#[tokio::test]
async fn todoist_fetches_completed_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/completed/get_all"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "100",
                    "task_id": "555",
                    "content": "Write report",
                    "completed_at": "2024-03-15T10:00:00.000000Z",
                    "project_id": "1"
                },
                { "id": 101, "content": "Inbox zero", "completed_date": "2024-03-14T08:30:00", "project_id": null }
            ],
            "projects": {}
        })))
        .mount(&server)
        .await;

    let tasks = client(&server).try_fetch_completed_tasks().await.unwrap();

    assert_eq!(tasks.len(), 2);
    let first = tasks[0].as_ref().unwrap();
    assert_eq!(first.remote_id, 100);
    assert_eq!(first.content, "Write report");
    assert_eq!(first.completed_at.as_deref(), Some("2024-03-15T10:00:00.000000Z"));
    assert_eq!(first.project_remote_id, Some(1));
    let second = tasks[1].as_ref().unwrap();
    assert_eq!(second.completed_at.as_deref(), Some("2024-03-14T08:30:00"));
    assert_eq!(second.project_remote_id, None);
}

#[tokio::test]
async fn todoist_reports_malformed_records_individually() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/completed/get_all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "100", "content": "Fine", "completed_at": "2024-03-15T10:00:00Z" },
                { "id": "101" },
                { "id": "102", "content": "Also fine" }
            ]
        })))
        .mount(&server)
        .await;

    let tasks = client(&server).try_fetch_completed_tasks().await.unwrap();

    assert_eq!(tasks.len(), 3);
    assert!(tasks[0].is_ok());
    match &tasks[1] {
        Err(e @ RecordValidationError::Malformed { index, .. }) => {
            assert_eq!(*index, 1);
            assert_eq!(e.kind(), RecordKind::Task);
        }
        other => panic!("expected a malformed record, got {other:?}"),
    }
    // A missing completion time is left for the sync engine to reject
    assert_eq!(tasks[2].as_ref().unwrap().completed_at, None);
}

#[tokio::test]
async fn todoist_missing_list_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sync_token": "abc" })))
        .mount(&server)
        .await;

    assert!(client(&server).try_fetch_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn todoist_http_error_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sync"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);
    match client.try_fetch_projects().await {
        Err(TransportError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected an HTTP status error, got {other:?}"),
    }

    // The lenient variant swallows the failure
    assert!(client.fetch_projects().await.is_empty());
}

#[tokio::test]
async fn todoist_unexpected_envelope_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/completed/get_all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": "nope" })))
        .mount(&server)
        .await;

    let result = client(&server).try_fetch_completed_tasks().await;
    assert!(matches!(result, Err(TransportError::Decode { .. })));
}

#[tokio::test]
async fn todoist_rejected_token_yields_no_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/completed/get_all"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(client(&server).fetch_completed_tasks().await.is_empty());
}
