use std::future::Future;
use std::time::Duration;

use http::{HeaderMap, StatusCode};
use reqwest::Client;
use tracing::debug;

use crate::config::settings::HttpConfig;
use crate::error::TokenError;
use crate::sources::request_builder::{PreparedRequest, Protocol};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Issues one GET and reads the whole body.
///
/// Connection-level failures surface as [`TokenError::Transport`]; any
/// status code, error or not, is returned as a response.
pub trait Transport {
    fn get(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<RawResponse, TokenError>> + Send;
}

/// `reqwest`-backed transport with one client per protocol.
///
/// The HTTPS client is built with `https_only`, so a redirect can never
/// downgrade a TLS token request to plain HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    https: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TokenError> {
        Ok(Self {
            http: build_client(config, false)?,
            https: build_client(config, true)?,
        })
    }

    fn client(&self, protocol: Protocol) -> &Client {
        match protocol {
            Protocol::Http => &self.http,
            Protocol::Https => &self.https,
        }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, request: PreparedRequest) -> Result<RawResponse, TokenError> {
        debug!(protocol = request.protocol.as_str(), url = %request.url, "sending GET");
        let response = self
            .client(request.protocol)
            .get(request.url)
            .headers(request.headers)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(RawResponse { status, headers, body })
    }
}

fn build_client(config: &HttpConfig, https_only: bool) -> Result<Client, TokenError> {
    let mut builder = Client::builder().https_only(https_only);
    if let Some(timeout_ms) = config.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(connect_timeout_ms) = config.connect_timeout_ms {
        builder = builder.connect_timeout(Duration::from_millis(connect_timeout_ms));
    }
    Ok(builder.build()?)
}
