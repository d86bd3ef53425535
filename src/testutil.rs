//! Test utilities.
//!
//! This module is available to unit tests and, through the `testutil`
//! feature, to integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::api::{
    ApiError, AskRequest, Backend, ConnectRequest, ConnectResponse, QueryResponse,
};
use crate::session::{FileStore, KeyValueStore, SessionProvider};

/// A [`Backend`] that replays scripted results and records every request.
///
/// The last scripted result for a call is repeated once the script runs out.
#[derive(Default)]
pub struct FakeBackend {
    connect_script: Mutex<Vec<Result<ConnectResponse, ApiError>>>,
    ask_script: Mutex<Vec<Result<QueryResponse, ApiError>>>,
    connect_requests: Mutex<Vec<ConnectRequest>>,
    ask_requests: Mutex<Vec<AskRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect(self, result: Result<ConnectResponse, ApiError>) -> Self {
        self.connect_script.lock().unwrap().push(result);
        self
    }

    pub fn with_ask(self, result: Result<QueryResponse, ApiError>) -> Self {
        self.ask_script.lock().unwrap().push(result);
        self
    }

    pub fn connect_requests(&self) -> Vec<ConnectRequest> {
        self.connect_requests.lock().unwrap().clone()
    }

    pub fn ask_requests(&self) -> Vec<AskRequest> {
        self.ask_requests.lock().unwrap().clone()
    }

    fn next<T: Clone>(script: &Mutex<Vec<Result<T, ApiError>>>) -> Result<T, ApiError> {
        let mut script = script.lock().unwrap();
        match script.len() {
            0 => Err(ApiError::Transport("no scripted response".to_string())),
            1 => script[0].clone(),
            _ => script.remove(0),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn connect(&self, request: &ConnectRequest) -> Result<ConnectResponse, ApiError> {
        self.connect_requests.lock().unwrap().push(request.clone());
        Self::next(&self.connect_script)
    }

    async fn ask(&self, request: &AskRequest) -> Result<QueryResponse, ApiError> {
        self.ask_requests.lock().unwrap().push(request.clone());
        Self::next(&self.ask_script)
    }
}

/// Body of a typical `/ask` answer: SQL, explanation, two rows and a bar chart.
pub fn sample_answer_body() -> serde_json::Value {
    json!({
        "sql": "SELECT category, SUM(amount) AS value FROM sales GROUP BY category",
        "answer": "Category B sold twice as much as category A.",
        "data": [
            {"category": "A", "value": 10},
            {"category": "B", "value": 20}
        ],
        "chart": {"type": "bar", "x": "category", "y": "value"}
    })
}

pub fn sample_answer() -> QueryResponse {
    QueryResponse::from_body(&sample_answer_body())
}

/// A session provider over a fresh state directory. Keep the `TempDir`
/// alive for as long as the provider is used.
pub fn temp_session() -> (tempfile::TempDir, Arc<SessionProvider>) {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    (dir, Arc::new(SessionProvider::new(store)))
}
