#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cstu_passport::client::PassportBackend;
use cstu_passport::error::ClientError;
use cstu_passport::models::{ActivityType, SubmissionPayload};
use cstu_passport::page::{FieldId, Notifier};
use cstu_passport::services::FormController;
use cstu_passport::terminal::TerminalPage;
use reqwest::StatusCode;

#[derive(Clone, Copy, Debug)]
pub enum Reply {
    Ok,
    Reject(StatusCode),
    Unreachable,
}

impl Reply {
    fn into_error(self) -> Option<ClientError> {
        match self {
            Reply::Ok => None,
            Reply::Reject(status) => Some(ClientError::Rejected(status)),
            Reply::Unreachable => Some(transport_error()),
        }
    }
}

/// A `reqwest::Error` without touching the network.
pub fn transport_error() -> ClientError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("invalid url should not build");
    ClientError::Transport(err)
}

pub struct FakeBackend {
    activity_types: Vec<ActivityType>,
    fetch_reply: Reply,
    record_reply: Reply,
    pub submissions: Mutex<Vec<SubmissionPayload>>,
}

impl FakeBackend {
    pub fn new(fetch_reply: Reply, record_reply: Reply) -> Self {
        Self {
            activity_types: vec![
                ActivityType { id: 1, value: "Volunteer".to_string() },
                ActivityType { id: 2, value: "Competition".to_string() },
                ActivityType { id: 3, value: "Training".to_string() },
            ],
            fetch_reply,
            record_reply,
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl PassportBackend for FakeBackend {
    async fn fetch_activity_types(&self) -> Result<Vec<ActivityType>, ClientError> {
        match self.fetch_reply.into_error() {
            None => Ok(self.activity_types.clone()),
            Some(e) => Err(e),
        }
    }

    async fn submit_record(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<serde_json::Value, ClientError> {
        self.submissions.lock().unwrap().push(payload.clone());
        match self.record_reply.into_error() {
            None => Ok(serde_json::json!({ "id": 1 })),
            Some(e) => Err(e),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn controller(
    fetch_reply: Reply,
    record_reply: Reply,
) -> (FormController, Arc<FakeBackend>, Arc<RecordingNotifier>) {
    let backend = Arc::new(FakeBackend::new(fetch_reply, record_reply));
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = FormController::new(backend.clone(), notifier.clone());
    (controller, backend, notifier)
}

pub fn filled_page() -> TerminalPage {
    let mut page = TerminalPage::new();
    page.set_value(FieldId::FullName, "Jane Doe");
    page.set_value(FieldId::StudentId, "6409610000");
    page.set_value(FieldId::Email, "jane.doe@dome.tu.ac.th");
    page.set_value(FieldId::WorkTitle, "Open house volunteer");
    page.set_value(FieldId::ActivityType, "1");
    page.set_value(FieldId::AcademicYear, "2566");
    page.set_value(FieldId::Semester, "1");
    page.set_value(FieldId::StartDate, "2023-07-23T09:00");
    page.set_value(FieldId::EndDate, "2023-07-23T17:00");
    page.set_value(FieldId::Location, "SC3");
    page.set_value(FieldId::Description, "Guided visitors");
    page
}
