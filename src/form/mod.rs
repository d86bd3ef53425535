//! Database connection form.

use std::time::Duration;

use log::{info, warn};

use crate::api::{ApiError, Backend, ConnectRequest, ConnectResponse, ConnectionCredentials};
use crate::core::{InsightError, ValidationError};
use crate::session::SessionProvider;

pub const SUCCESS_MESSAGE: &str = "Connection successful";
pub const FAILURE_MESSAGE: &str = "Connection failed";
pub const DEFAULT_PORT: &str = "5432";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    Port,
    User,
    Password,
    Database,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Host,
        Field::Port,
        Field::User,
        Field::Password,
        Field::Database,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Host => "host",
            Field::Port => "port",
            Field::User => "user",
            Field::Password => "password",
            Field::Database => "database",
        }
    }

    pub fn label(&self) -> String {
        self.name().to_uppercase()
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password)
    }
}

/// Form contents as typed. The port stays text until [`validate`] runs.
///
/// [`validate`]: CredentialsDraft::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsDraft {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for CredentialsDraft {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT.to_string(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl CredentialsDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Host => &self.host,
            Field::Port => &self.port,
            Field::User => &self.user,
            Field::Password => &self.password,
            Field::Database => &self.database,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Host => self.host = value,
            Field::Port => self.port = value,
            Field::User => self.user = value,
            Field::Password => self.password = value,
            Field::Database => self.database = value,
        }
    }

    pub fn validate(&self) -> Result<ConnectionCredentials, ValidationError> {
        let port = self
            .port
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::InvalidPort(self.port.clone()))?;
        Ok(ConnectionCredentials {
            host: self.host.clone(),
            port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Failure(String),
}

impl FormStatus {
    pub fn message(&self) -> &str {
        match self {
            FormStatus::Success(msg) | FormStatus::Failure(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormStatus::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// A submit was already in flight.
    Ignored,
    Invalid(ValidationError),
    /// Switch to the chat view once `redirect_after` has passed.
    Connected { redirect_after: Duration },
    Failed,
}

pub struct ConnectionForm {
    draft: CredentialsDraft,
    status: Option<FormStatus>,
    in_flight: bool,
    redirect_delay: Duration,
}

impl ConnectionForm {
    pub fn new(redirect_delay: Duration) -> Self {
        Self {
            draft: CredentialsDraft::default(),
            status: None,
            in_flight: false,
            redirect_delay,
        }
    }

    pub fn draft(&self) -> &CredentialsDraft {
        &self.draft
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight { "Connecting..." } else { "Connect" }
    }

    /// Validates the draft and marks the form in flight. `Ok(None)` means a
    /// submit is already outstanding.
    pub fn begin(
        &mut self,
        session: &SessionProvider,
    ) -> Result<Option<ConnectRequest>, InsightError> {
        if self.in_flight {
            return Ok(None);
        }
        self.status = None;
        let credentials = match self.draft.validate() {
            Ok(credentials) => credentials,
            Err(e) => {
                self.status = Some(FormStatus::Failure(e.to_string()));
                return Err(e.into());
            }
        };
        let session_id = session.session_id()?;
        self.in_flight = true;
        Ok(Some(ConnectRequest {
            credentials,
            session_id,
        }))
    }

    pub fn finish(&mut self, result: Result<ConnectResponse, ApiError>) -> ConnectOutcome {
        self.in_flight = false;
        match result {
            Ok(ConnectResponse { success: true, .. }) => {
                info!("database connected");
                self.status = Some(FormStatus::Success(SUCCESS_MESSAGE.to_string()));
                ConnectOutcome::Connected {
                    redirect_after: self.redirect_delay,
                }
            }
            Ok(response) => {
                warn!("backend refused connection: {:?}", response.message);
                self.status = Some(FormStatus::Failure(FAILURE_MESSAGE.to_string()));
                ConnectOutcome::Failed
            }
            Err(e) => {
                warn!("connect failed: {e}");
                self.status = Some(FormStatus::Failure(FAILURE_MESSAGE.to_string()));
                ConnectOutcome::Failed
            }
        }
    }

    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        session: &SessionProvider,
    ) -> Result<ConnectOutcome, InsightError> {
        let request = match self.begin(session) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(ConnectOutcome::Ignored),
            Err(InsightError::Validation(e)) => return Ok(ConnectOutcome::Invalid(e)),
            Err(e) => return Err(e),
        };
        let result = backend.connect(&request).await;
        Ok(self.finish(result))
    }
}
