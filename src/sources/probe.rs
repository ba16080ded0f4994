use http::header::WWW_AUTHENTICATE;
use http::StatusCode;
use tracing::{debug, info};

use crate::error::TokenError;
use crate::sources::request_builder::RequestBuilder;
use crate::sources::transport::Transport;
use crate::utils::constants::{MEDIA_TYPE_JSON, REGISTRY_V2_PATH};

pub fn challenge_url(registry: &str) -> String {
    format!("{}{}", registry.trim_end_matches('/'), REGISTRY_V2_PATH)
}

/// Ask a registry's `/v2/` endpoint, unauthenticated, for its challenge.
///
/// `Ok(None)` means the registry answered 2xx and needs no token.
pub async fn fetch_challenge<T: Transport>(
    transport: &T,
    user_agent: &str,
    registry: &str,
) -> Result<Option<String>, TokenError> {
    let request = RequestBuilder::new(&challenge_url(registry))?
        .accept(MEDIA_TYPE_JSON)
        .user_agent(user_agent)
        .build()?;

    info!(url = %request.url, "probing registry for challenge");
    let response = transport.get(request).await?;

    match response.status {
        status if status.is_success() => {
            debug!(status = status.as_u16(), "registry requires no authentication");
            Ok(None)
        }
        StatusCode::UNAUTHORIZED => {
            let challenge = response
                .headers
                .get(WWW_AUTHENTICATE)
                .ok_or(TokenError::NoSupportedScheme)?
                .to_str()
                .map_err(TokenError::transport)?;
            debug!(challenge, "registry challenge received");
            Ok(Some(challenge.to_owned()))
        }
        status => Err(TokenError::unexpected_status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::StubTransport;

    const CHALLENGE: &str = r#"Bearer realm="https://auth.docker.io/token",service="registry.docker.io""#;

    #[test]
    fn test_challenge_url() {
        assert_eq!(challenge_url("https://registry-1.docker.io"), "https://registry-1.docker.io/v2/");
        assert_eq!(challenge_url("https://registry-1.docker.io/"), "https://registry-1.docker.io/v2/");
    }

    #[tokio::test]
    async fn test_fetch_challenge_from_401() {
        let transport = StubTransport::new(StatusCode::UNAUTHORIZED, "{}")
            .with_header(WWW_AUTHENTICATE, CHALLENGE);
        let challenge = fetch_challenge(&transport, "ua", "https://registry-1.docker.io").await.unwrap();
        assert_eq!(challenge.as_deref(), Some(CHALLENGE));
        assert_eq!(transport.requests()[0].url.as_str(), "https://registry-1.docker.io/v2/");
    }

    #[tokio::test]
    async fn test_fetch_challenge_open_registry() {
        let transport = StubTransport::new(StatusCode::OK, "{}");
        let challenge = fetch_challenge(&transport, "ua", "http://localhost:5000").await.unwrap();
        assert_eq!(challenge, None);
    }

    #[tokio::test]
    async fn test_fetch_challenge_401_without_header() {
        let transport = StubTransport::new(StatusCode::UNAUTHORIZED, "{}");
        let result = fetch_challenge(&transport, "ua", "https://registry.example.org").await;
        assert!(matches!(result, Err(TokenError::NoSupportedScheme)));
    }

    #[tokio::test]
    async fn test_fetch_challenge_unexpected_status() {
        let transport = StubTransport::new(StatusCode::BAD_GATEWAY, "");
        let result = fetch_challenge(&transport, "ua", "https://registry.example.org").await;
        assert!(matches!(
            result,
            Err(TokenError::UnexpectedStatus { status: StatusCode::BAD_GATEWAY, .. })
        ));
    }
}
