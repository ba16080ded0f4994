use tracing::{info, instrument};

use crate::config::settings::{HttpConfig, Settings};
use crate::error::TokenError;
use crate::parser::params_from_challenge;
use crate::sources::probe::fetch_challenge;
use crate::sources::token_response::TokenResponse;
use crate::sources::transport::{ReqwestTransport, Transport};
use crate::sources::fetch;

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Replaces the challenge's scope when set and non-empty.
    pub scope: Option<String>,
}

impl TokenOptions {
    pub fn with_scope(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
        }
    }
}

/// Entry point: challenge in, token response out.
///
/// Holds no per-call state, so one client can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct TokenClient<T = ReqwestTransport> {
    transport: T,
    user_agent: String,
}

impl TokenClient<ReqwestTransport> {
    pub fn new() -> Result<Self, TokenError> {
        Self::from_config(&HttpConfig::default())
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, TokenError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?, &config.user_agent))
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TokenError> {
        Self::from_config(&settings.http)
    }
}

impl<T: Transport> TokenClient<T> {
    pub fn with_transport(transport: T, user_agent: &str) -> Self {
        Self {
            transport,
            user_agent: user_agent.to_owned(),
        }
    }

    /// Parse the challenge, pick its bearer entry, and fetch a token.
    ///
    /// Fails with [`TokenError::NoSupportedScheme`] before any network
    /// activity when no entry qualifies.
    #[instrument(skip(self, options), fields(scope = ?options.scope))]
    pub async fn request_token(&self, challenge: &str, options: &TokenOptions) -> Result<TokenResponse, TokenError> {
        let params = params_from_challenge(challenge, options.scope.as_deref())?;
        fetch::request_token(&self.transport, &self.user_agent, &params).await
    }

    /// Probe `<registry>/v2/` and, if it challenges, fetch a token.
    ///
    /// `Ok(None)` when the registry needs no authentication.
    pub async fn authenticate(&self, registry: &str, options: &TokenOptions) -> Result<Option<TokenResponse>, TokenError> {
        match fetch_challenge(&self.transport, &self.user_agent, registry).await? {
            Some(challenge) => self.request_token(&challenge, options).await.map(Some),
            None => {
                info!(registry, "registry is open, no token needed");
                Ok(None)
            }
        }
    }
}

/// One-shot [`TokenClient::request_token`] with default settings.
pub async fn request_token(challenge: &str, options: &TokenOptions) -> Result<TokenResponse, TokenError> {
    // checked first so an unusable challenge never builds a client
    params_from_challenge(challenge, options.scope.as_deref())?;
    TokenClient::new()?.request_token(challenge, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::StubTransport;
    use http::header::WWW_AUTHENTICATE;
    use http::StatusCode;
    use serde_json::json;

    const CHALLENGE: &str = r#"Bearer realm="https://auth.example.org/token",service="registry.example.org",scope="repository:app:pull""#;

    #[tokio::test]
    async fn test_request_token_uses_challenge_scope() {
        let client = TokenClient::with_transport(StubTransport::new(StatusCode::OK, r#"{"token":"abc"}"#), "ua");
        let response = client.request_token(CHALLENGE, &TokenOptions::default()).await.unwrap();
        assert_eq!(response.body, json!({"token":"abc"}));

        let sent = client.transport.requests();
        assert_eq!(
            sent[0].url.as_str(),
            "https://auth.example.org/token?service=registry.example.org&scope=repository:app:pull"
        );
    }

    #[tokio::test]
    async fn test_request_token_scope_override() {
        let client = TokenClient::with_transport(StubTransport::new(StatusCode::OK, "{}"), "ua");
        client
            .request_token(CHALLENGE, &TokenOptions::with_scope("repository:app:push"))
            .await
            .unwrap();
        assert_eq!(
            client.transport.requests()[0].url.as_str(),
            "https://auth.example.org/token?service=registry.example.org&scope=repository:app:push"
        );
    }

    #[tokio::test]
    async fn test_request_token_no_scheme_makes_no_call() {
        let client = TokenClient::with_transport(StubTransport::new(StatusCode::OK, "{}"), "ua");
        let result = client.request_token(r#"Basic realm="x""#, &TokenOptions::default()).await;
        assert!(matches!(result, Err(TokenError::NoSupportedScheme)));
        assert!(client.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_free_request_token_rejects_before_network() {
        let result = request_token(r#"Bearer realm="https://a""#, &TokenOptions::default()).await;
        assert!(matches!(result, Err(TokenError::NoSupportedScheme)));
    }

    #[tokio::test]
    async fn test_authenticate_open_registry() {
        let client = TokenClient::with_transport(StubTransport::new(StatusCode::OK, "{}"), "ua");
        let response = client.authenticate("http://localhost:5000", &TokenOptions::default()).await.unwrap();
        assert!(response.is_none());
        assert_eq!(client.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_authenticate_follows_challenge() {
        // the stub answers every request the same way: the probe sees a 401
        // with a challenge, and the token request resolves on that 401 body
        let transport = StubTransport::new(StatusCode::UNAUTHORIZED, r#"{"details":"denied"}"#)
            .with_header(WWW_AUTHENTICATE, CHALLENGE);
        let client = TokenClient::with_transport(transport, "ua");
        let response = client
            .authenticate("https://registry.example.org", &TokenOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["details"], "denied");

        let urls: Vec<String> = client.transport.requests().iter().map(|r| r.url.to_string()).collect();
        assert_eq!(
            urls,
            vec![
                "https://registry.example.org/v2/".to_owned(),
                "https://auth.example.org/token?service=registry.example.org&scope=repository:app:pull".to_owned(),
            ]
        );
    }
}
