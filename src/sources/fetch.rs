//! Token requester
//!
//! Turns selected bearer parameters into one GET against the realm and
//! classifies what comes back.

use http::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::TokenError;
use crate::parser::TokenRequestParams;
use crate::sources::request_builder::RequestBuilder;
use crate::sources::token_response::TokenResponse;
use crate::sources::transport::{RawResponse, Transport};
use crate::utils::constants::MEDIA_TYPE_JSON;

/// Realm plus `service` and optional `scope` query parameters.
///
/// Values are appended as given, without percent-encoding. A realm that
/// already has a query keeps it and gets the new parameters after `&`.
pub fn token_url(params: &TokenRequestParams) -> String {
    let separator = if params.realm.contains('?') { '&' } else { '?' };
    let mut location = format!("{}{}service={}", params.realm, separator, params.service);
    if let Some(scope) = &params.scope {
        location.push_str("&scope=");
        location.push_str(scope);
    }
    location
}

/// 200, 401 and 404 all carry a JSON body the caller inspects; anything else
/// is an error.
pub fn classify(response: RawResponse) -> Result<TokenResponse, TokenError> {
    match response.status {
        StatusCode::OK | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
            let body: Value =
                serde_json::from_str(&response.body).map_err(TokenError::MalformedResponseBody)?;
            Ok(TokenResponse::new(response.status, body))
        }
        status => {
            warn!(status = status.as_u16(), "token endpoint answered with unexpected status");
            Err(TokenError::unexpected_status(status))
        }
    }
}

/// Exactly one attempt: build, send, classify.
pub async fn request_token<T: Transport>(
    transport: &T,
    user_agent: &str,
    params: &TokenRequestParams,
) -> Result<TokenResponse, TokenError> {
    let location = token_url(params);
    let request = RequestBuilder::new(&location)?
        .accept(MEDIA_TYPE_JSON)
        .user_agent(user_agent)
        .build()?;

    info!(url = %request.url, service = %params.service, "requesting token");
    let response = transport.get(request).await?;
    let token_response = classify(response)?;
    info!(status = token_response.status.as_u16(), "token endpoint responded");
    Ok(token_response)
}
