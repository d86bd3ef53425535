mod client;
mod error;
mod response;
mod types;

pub use client::{ASK_PATH, Backend, CONNECT_PATH, HttpBackend};
pub use error::{ApiError, SESSION_EXPIRED_STATUS};
pub use response::{QueryResponse, Section};
pub use types::{AskRequest, ConnectRequest, ConnectResponse, ConnectionCredentials, ErrorBody};
