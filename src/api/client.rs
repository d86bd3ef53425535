use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Response;
use serde_json::Value;

use crate::conf::BackendConfig;

use super::error::{ApiError, SESSION_EXPIRED_STATUS};
use super::response::QueryResponse;
use super::types::{AskRequest, ConnectRequest, ConnectResponse, ErrorBody};

pub const CONNECT_PATH: &str = "/connect-db";
pub const ASK_PATH: &str = "/ask";

/// The two calls the client makes against the assistant backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn connect(&self, request: &ConnectRequest) -> Result<ConnectResponse, ApiError>;
    async fn ask(&self, request: &AskRequest) -> Result<QueryResponse, ApiError>;
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("building http client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The `error` text of a failed response body, when it has one.
    async fn error_text(response: Response) -> Option<String> {
        match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.error),
            Err(e) => {
                debug!("could not read error body: {e}");
                None
            }
        }
    }

    async fn server_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let error = Self::error_text(response).await;
        warn!(
            "backend returned status {status}: {}",
            error.as_deref().unwrap_or("<no message>")
        );
        ApiError::Server { status, error }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn connect(&self, request: &ConnectRequest) -> Result<ConnectResponse, ApiError> {
        info!(
            "connecting session {} to {}:{}/{}",
            request.session_id,
            request.credentials.host,
            request.credentials.port,
            request.credentials.database
        );
        let response = self
            .client
            .post(self.url(CONNECT_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{CONNECT_PATH}: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        let body: ConnectResponse = response.json().await?;
        debug!("connect response: {body:?}");
        Ok(body)
    }

    async fn ask(&self, request: &AskRequest) -> Result<QueryResponse, ApiError> {
        info!("asking for session {}: {}", request.session_id, request.question);
        let response = self
            .client
            .post(self.url(ASK_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{ASK_PATH}: {e}")))?;

        let status = response.status();
        if status.as_u16() == SESSION_EXPIRED_STATUS {
            warn!("session {} expired", request.session_id);
            let error = Self::error_text(response).await;
            return Err(ApiError::SessionExpired { error });
        }
        if !status.is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: Value = response.json().await?;
        debug!("ask response: {body}");
        Ok(QueryResponse::from_body(&body))
    }
}
