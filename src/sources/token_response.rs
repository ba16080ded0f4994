use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::Value;

/// Decoded body of a token endpoint answer.
///
/// The body is passed through as-is; the accessors only read the fields
/// registries conventionally send and never reject a response.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    /// one of 200, 401 or 404
    pub status: StatusCode,
    pub body: Value,
}

impl TokenResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// `token`, falling back to the OAuth2 spelling `access_token`.
    pub fn token(&self) -> Option<&str> {
        self.body["token"]
            .as_str()
            .or_else(|| self.body["access_token"].as_str())
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.body["expires_in"].as_u64()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.body["issued_at"]
            .as_str()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}
