#![allow(dead_code)]

use async_trait::async_trait;
use smartreader::api::{ApiError, SummaryApi};
use smartreader::summary::{
    AnswerRequest, QuestionAnswer, ServerStatus, SubmissionRequest, SummarizeResponse, Summary,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use tokio::time::Instant;
use wiremock::MockServer;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(smartreader::logging::initialize_for_tests);
}

/// Base URL of the API mounted on a mock server
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

pub fn http_api(server: &MockServer) -> Arc<dyn SummaryApi> {
    let base = url::Url::parse(&api_base(server)).unwrap();
    Arc::new(smartreader::HttpApi::new(base, std::time::Duration::from_secs(5)).unwrap())
}

/// A client for a port nothing listens on
pub fn closed_api() -> Arc<dyn SummaryApi> {
    let base = url::Url::parse("http://127.0.0.1:9/api").unwrap();
    Arc::new(smartreader::HttpApi::new(base, std::time::Duration::from_secs(2)).unwrap())
}

pub fn summary_json(id: &str, title: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "summary": text,
        "url": format!("https://example.com/{}", id),
        "created_at": "2024-05-01T10:30:00.000000",
    })
}

pub fn initializing() -> Result<ServerStatus, ApiError> {
    Ok(ServerStatus {
        status: "initializing".to_string(),
        message: Some("Models are still loading".to_string()),
    })
}

pub fn ok() -> Result<ServerStatus, ApiError> {
    Ok(ServerStatus {
        status: "ok".to_string(),
        message: None,
    })
}

pub fn offline() -> Result<ServerStatus, ApiError> {
    Err(ApiError::Network("connection refused".to_string()))
}

/// Answers `/status` from a script; the last entry repeats forever.
pub struct ScriptedStatus {
    script: Mutex<VecDeque<fn() -> Result<ServerStatus, ApiError>>>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedStatus {
    pub fn new(script: Vec<fn() -> Result<ServerStatus, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryApi for ScriptedStatus {
    async fn status(&self) -> Result<ServerStatus, ApiError> {
        self.calls.lock().unwrap().push(Instant::now());
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            *script.front().unwrap()
        };
        next()
    }

    async fn summarize(&self, _request: &SubmissionRequest) -> Result<SummarizeResponse, ApiError> {
        unimplemented!("status only")
    }

    async fn summaries(&self) -> Result<Vec<Summary>, ApiError> {
        unimplemented!("status only")
    }

    async fn summary(&self, _id: &str) -> Result<Summary, ApiError> {
        unimplemented!("status only")
    }

    async fn answer(&self, _request: &AnswerRequest) -> Result<QuestionAnswer, ApiError> {
        unimplemented!("status only")
    }
}
