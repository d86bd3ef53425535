use serde::{Deserialize, Serialize};

/// A validated snapshot of the connection form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Request body for `POST /connect-db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectRequest {
    #[serde(flatten)]
    pub credentials: ConnectionCredentials,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Response body of `POST /connect-db`. Only `success` drives the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body for `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Error body the backend sends with non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connect_request_is_flat() {
        let req = ConnectRequest {
            credentials: ConnectionCredentials {
                host: "db.local".to_string(),
                port: 5432,
                user: "admin".to_string(),
                password: "secret".to_string(),
                database: "shop".to_string(),
            },
            session_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "host": "db.local",
                "port": 5432,
                "user": "admin",
                "password": "secret",
                "database": "shop",
                "sessionId": "abc"
            })
        );
    }

    #[test]
    fn test_ask_request_uses_camel_case_session() {
        let req = AskRequest {
            question: "top products".to_string(),
            session_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"question": "top products", "sessionId": "abc"})
        );
    }

    #[test]
    fn test_connect_response_tolerates_missing_fields() {
        let resp: ConnectResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        let resp: ConnectResponse =
            serde_json::from_str(r#"{"success": true, "message": "ok", "extra": 1}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message.as_deref(), Some("ok"));
    }
}
