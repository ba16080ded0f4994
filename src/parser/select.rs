use tracing::debug;

use crate::error::TokenError;
use crate::parser::challenge::{self, AuthScheme};

pub const BEARER_SCHEME: &str = "bearer";
pub const PARAM_REALM: &str = "realm";
pub const PARAM_SERVICE: &str = "service";
pub const PARAM_SCOPE: &str = "scope";

/// Where to ask for a token and what to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequestParams {
    pub realm: String,
    pub service: String,
    pub scope: Option<String>,
}

/// Pick the first `bearer` entry that names both a realm and a service.
///
/// A non-empty `override_scope` replaces whatever scope the challenge asked
/// for. Empty scopes, on either side, count as absent.
pub fn select_bearer(
    schemes: &[AuthScheme],
    override_scope: Option<&str>,
) -> Result<TokenRequestParams, TokenError> {
    let scheme = schemes
        .iter()
        .find(|scheme| {
            scheme.name == BEARER_SCHEME
                && scheme.parameters.contains_key(PARAM_REALM)
                && scheme.parameters.contains_key(PARAM_SERVICE)
        })
        .ok_or(TokenError::NoSupportedScheme)?;

    let scope = match (non_empty(override_scope), non_empty(scheme.param(PARAM_SCOPE))) {
        (Some(scope), _) => Some(scope.to_owned()),
        (None, Some(scope)) => Some(scope.to_owned()),
        (None, None) => None,
    };

    let params = TokenRequestParams {
        realm: scheme.parameters[PARAM_REALM].clone(),
        service: scheme.parameters[PARAM_SERVICE].clone(),
        scope,
    };
    debug!(realm = %params.realm, service = %params.service, scope = ?params.scope, "selected bearer scheme");
    Ok(params)
}

/// Parse a challenge and select its bearer parameters in one step.
pub fn params_from_challenge(
    challenge: &str,
    override_scope: Option<&str>,
) -> Result<TokenRequestParams, TokenError> {
    select_bearer(&challenge::parse(challenge), override_scope)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
