use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An inbound request as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub method: String,
    /// JSON-encoded payload; empty when the request carries none.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub query_parameters: HashMap<String, String>,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    /// Returns the query parameter `name` if present and non-empty.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// The outbound response handed back to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    /// JSON-encoded envelope.
    pub body: String,
}

/// Failure envelope: `{"error": "<message>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_string(&ErrorBody::new("User already exists")).unwrap();
        assert_eq!(body, r#"{"error":"User already exists"}"#);
    }

    #[test]
    fn test_empty_error_body_omits_field() {
        let body = serde_json::to_string(&ErrorBody::default()).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_query_ignores_empty_values() {
        let request = ApiRequest::new("GET")
            .with_query("email", "")
            .with_query("other", "x");

        assert_eq!(request.query("email"), None);
        assert_eq!(request.query("other"), Some("x"));
        assert_eq!(request.query("missing"), None);
    }

    #[test]
    fn test_request_decodes_transport_shape() {
        let request: ApiRequest = serde_json::from_str(
            r#"{"method":"GET","queryParameters":{"email":"a@b.com"}}"#,
        )
        .unwrap();

        assert_eq!(request.method, "GET");
        assert!(request.body.is_empty());
        assert_eq!(request.query("email"), Some("a@b.com"));
    }
}
