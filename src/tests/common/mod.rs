// tests/common/mod.rs
use std::sync::Mutex;

use http::{HeaderName, HeaderValue, StatusCode};

use crate::config::settings::HttpConfig;
use crate::error::TokenError;
use crate::parser::TokenRequestParams;
use crate::sources::request_builder::PreparedRequest;
use crate::sources::transport::{RawResponse, ReqwestTransport, Transport};

pub fn params(realm: &str, service: &str, scope: Option<&str>) -> TokenRequestParams {
    TokenRequestParams {
        realm: realm.to_owned(),
        service: service.to_owned(),
        scope: scope.map(str::to_owned),
    }
}

/// In-memory transport: answers every request with the same response (or
/// error message) and records what was sent.
pub struct StubTransport {
    response: Result<RawResponse, String>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl StubTransport {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            response: Ok(RawResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(response) = &mut self.response {
            response.headers.insert(name, HeaderValue::from_str(value).unwrap());
        }
        self
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn get(&self, request: PreparedRequest) -> Result<RawResponse, TokenError> {
        self.requests.lock().unwrap().push(request);
        self.response.clone().map_err(TokenError::transport)
    }
}

pub fn build_reqwest_transport() -> ReqwestTransport {
    ReqwestTransport::new(&HttpConfig {
        timeout_ms: Some(5000),
        ..Default::default()
    })
    .expect("reqwest transport")
}
