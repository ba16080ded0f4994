use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderMap, HeaderValue};
use reqwest::Url;

use crate::error::TokenError;
use crate::utils::constants::{DEFAULT_USER_AGENT, PROTOCOL_HTTP, PROTOCOL_HTTPS};

/// Transport strategy, resolved once from the target URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            PROTOCOL_HTTP => Some(Protocol::Http),
            PROTOCOL_HTTPS => Some(Protocol::Https),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => PROTOCOL_HTTP,
            Protocol::Https => PROTOCOL_HTTPS,
        }
    }
}

/// A GET request ready to hand to a [`Transport`](crate::sources::transport::Transport).
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub protocol: Protocol,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Builds a GET request from a location string.
///
/// The location is split into protocol, host, port, path and query up front,
/// so a bad location fails here, before anything touches the network.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    protocol: Protocol,
    url: Url,
    accept: Option<String>,
    user_agent: String,
}

impl RequestBuilder {
    pub fn new(location: &str) -> Result<Self, TokenError> {
        let invalid = |reason: String| TokenError::InvalidRealm {
            realm: location.to_owned(),
            reason,
        };

        let url = Url::parse(location).map_err(|e| invalid(e.to_string()))?;
        let protocol = Protocol::from_scheme(url.scheme())
            .ok_or_else(|| invalid(format!("unsupported protocol '{}'", url.scheme())))?;
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_owned()));
        }

        Ok(Self {
            protocol,
            url,
            accept: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, or the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Sets the acceptable media types.
    pub fn accept(mut self, types: &str) -> Self {
        self.accept = Some(types.to_owned());
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_owned();
        self
    }

    pub fn build(self) -> Result<PreparedRequest, TokenError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent).map_err(TokenError::transport)?);
        if let Some(accept) = &self.accept {
            headers.insert(ACCEPT, HeaderValue::from_str(accept).map_err(TokenError::transport)?);
        }

        Ok(PreparedRequest {
            protocol: self.protocol,
            url: self.url,
            headers,
        })
    }
}
