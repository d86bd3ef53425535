//! Question box and answer state for the chat view.

use log::{info, warn};

use crate::api::{ApiError, AskRequest, Backend, QueryResponse};
use crate::core::InsightError;
use crate::session::SessionProvider;

pub const PLACEHOLDER: &str = "Ask a question like: Top 3 products sold last month";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const SESSION_EXPIRED_ALERT: &str =
    "Your session has expired. Please reconnect your database.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// Empty question or a request already in flight; nothing was sent.
    Skipped,
    Answered,
    Failed,
    /// The session id was cleared; show `alert` and return to the connect view.
    SessionExpired { alert: String },
}

#[derive(Default)]
pub struct ChatInterface {
    question: String,
    response: Option<QueryResponse>,
    in_flight: bool,
}

impl ChatInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn response(&self) -> Option<&QueryResponse> {
        self.response.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight { "Loading..." } else { "Ask" }
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.question.trim().is_empty()
    }

    /// Marks a request in flight and drops the previous answer. Returns
    /// `None`, touching nothing, when [`can_submit`](Self::can_submit) is false.
    pub fn begin(
        &mut self,
        session: &SessionProvider,
    ) -> Result<Option<AskRequest>, InsightError> {
        if !self.can_submit() {
            return Ok(None);
        }
        let session_id = session.session_id()?;
        self.in_flight = true;
        self.response = None;
        Ok(Some(AskRequest {
            question: self.question.clone(),
            session_id,
        }))
    }

    pub fn finish(
        &mut self,
        result: Result<QueryResponse, ApiError>,
        session: &SessionProvider,
    ) -> Result<AskOutcome, InsightError> {
        self.in_flight = false;
        match result {
            Ok(response) => {
                info!("received answer with {} sections", response.sections().len());
                self.response = Some(response);
                Ok(AskOutcome::Answered)
            }
            Err(e @ ApiError::SessionExpired { .. }) => {
                session.clear()?;
                let message = e.server_message().unwrap_or(UNKNOWN_ERROR);
                self.response = Some(QueryResponse::error(message));
                Ok(AskOutcome::SessionExpired {
                    alert: SESSION_EXPIRED_ALERT.to_string(),
                })
            }
            Err(e) => {
                warn!("ask failed: {e}");
                let message = e.server_message().unwrap_or(UNKNOWN_ERROR);
                self.response = Some(QueryResponse::error(message));
                Ok(AskOutcome::Failed)
            }
        }
    }

    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        session: &SessionProvider,
    ) -> Result<AskOutcome, InsightError> {
        let Some(request) = self.begin(session)? else {
            return Ok(AskOutcome::Skipped);
        };
        let result = backend.ask(&request).await;
        self.finish(result, session)
    }

    /// Enter in the question box submits; other keys do nothing.
    pub async fn handle_key(
        &mut self,
        key: Key,
        backend: &dyn Backend,
        session: &SessionProvider,
    ) -> Result<AskOutcome, InsightError> {
        match key {
            Key::Enter => self.submit(backend, session).await,
            Key::Other => Ok(AskOutcome::Skipped),
        }
    }
}
