mod common;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{RecordingNotifier, filled_page};
use cstu_passport::client::{BackendConfig, PassportBackend, PassportHttpClient};
use cstu_passport::error::ClientError;
use cstu_passport::models::{ActivityType, FormFields, SubmissionPayload};
use cstu_passport::services::{FormController, SubmitOutcome};
use cstu_passport::terminal::TerminalPage;

type Received = Arc<Mutex<Vec<SubmissionPayload>>>;

async fn spawn_backend(router: Router) -> BackendConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    BackendConfig::new("127.0.0.1", addr.port())
}

fn passport_router(received: Received) -> Router {
    Router::new()
        .route("/getActivityType", get(activity_types))
        .route("/record", post(record))
        .with_state(received)
}

async fn activity_types() -> Json<Vec<ActivityType>> {
    Json(vec![
        ActivityType { id: 1, value: "Volunteer".to_string() },
        ActivityType { id: 2, value: "Competition".to_string() },
    ])
}

async fn record(
    State(received): State<Received>,
    Json(payload): Json<SubmissionPayload>,
) -> Json<serde_json::Value> {
    received.lock().unwrap().push(payload);
    Json(serde_json::json!({ "message": "Record created" }))
}

async fn unreachable_config() -> BackendConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    BackendConfig::new("127.0.0.1", port)
}

#[tokio::test]
async fn test_fetch_activity_types_over_http() {
    let config = spawn_backend(passport_router(Received::default())).await;
    let client = PassportHttpClient::new(config).unwrap();

    let types = client.fetch_activity_types().await.unwrap();

    assert_eq!(
        types,
        vec![
            ActivityType { id: 1, value: "Volunteer".to_string() },
            ActivityType { id: 2, value: "Competition".to_string() },
        ]
    );
}

#[tokio::test]
async fn test_fetch_activity_types_non_success_is_rejected() {
    let router = Router::new().route(
        "/getActivityType",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let config = spawn_backend(router).await;
    let client = PassportHttpClient::new(config).unwrap();

    let err = client.fetch_activity_types().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Rejected(s) if s == reqwest::StatusCode::SERVICE_UNAVAILABLE
    ));
}

#[tokio::test]
async fn test_submit_record_posts_json() {
    let received = Received::default();
    let config = spawn_backend(passport_router(received.clone())).await;
    let client = PassportHttpClient::new(config).unwrap();

    let payload = SubmissionPayload {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        student_id: 6409610000,
        email: "jane.doe@dome.tu.ac.th".to_string(),
        title: "Open house volunteer".to_string(),
        type_of_work_id: 1,
        academic_year: 2023,
        semester: 1,
        start_date: "2023-07-23T09:00".to_string(),
        end_date: "2023-07-23T17:00".to_string(),
        location: "SC3".to_string(),
        description: "Guided visitors".to_string(),
    };

    let body = client.submit_record(&payload).await.unwrap();

    assert_eq!(body["message"], "Record created");
    assert_eq!(received.lock().unwrap().as_slice(), &[payload]);
}

#[tokio::test]
async fn test_submit_record_non_json_success_is_transport_error() {
    let router = Router::new().route("/record", post(|| async { "ok" }));
    let config = spawn_backend(router).await;
    let client = PassportHttpClient::new(config).unwrap();

    let payload = SubmissionPayload::from_fields(&FormFields::from_page(&filled_page())).unwrap();
    let err = client.submit_record(&payload).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = PassportHttpClient::new(unreachable_config().await).unwrap();

    let err = client.fetch_activity_types().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_controller_end_to_end_over_http() {
    let received = Received::default();
    let config = spawn_backend(passport_router(received.clone())).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = FormController::connect(config, notifier.clone()).unwrap();

    let mut page = filled_page();
    assert_eq!(controller.on_load(&mut page).await, 2);

    let outcome = controller.submit(&mut page).await;

    assert!(matches!(outcome, SubmitOutcome::Rendered(ref c) if c.academic_year == 2566));
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].academic_year, 2023);
    assert_eq!(notifier.alerts().len(), 1);
}

#[tokio::test]
async fn test_controller_with_unreachable_backend_stays_quiet() {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller =
        FormController::connect(unreachable_config().await, notifier.clone()).unwrap();
    let mut page = TerminalPage::new();

    assert_eq!(controller.on_load(&mut page).await, 0);

    let mut page = filled_page();
    assert_eq!(controller.submit(&mut page).await, SubmitOutcome::TransportFailed);
    assert!(notifier.alerts().is_empty());
}
