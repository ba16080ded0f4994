use http::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of a single challenge-parse-and-fetch cycle.
///
/// Every variant is terminal: nothing is retried internally.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The challenge carried no `bearer` entry with both `realm` and `service`.
    #[error("no supported scheme found")]
    NoSupportedScheme,

    #[error("invalid realm '{realm}': {reason}")]
    InvalidRealm { realm: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("unexpected response: {message} ({})", .status.as_u16())]
    UnexpectedStatus { status: StatusCode, message: String },

    #[error("malformed response body: {0}")]
    MalformedResponseBody(#[source] serde_json::Error),
}

impl TokenError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        TokenError::Transport(err.into())
    }

    pub(crate) fn unexpected_status(status: StatusCode) -> Self {
        TokenError::UnexpectedStatus {
            status,
            message: status.canonical_reason().unwrap_or("unknown status").to_owned(),
        }
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(err: reqwest::Error) -> Self {
        TokenError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_carries_reason_phrase() {
        let err = TokenError::unexpected_status(StatusCode::INTERNAL_SERVER_ERROR);
        match &err {
            TokenError::UnexpectedStatus { status, message } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected variant {:?}", other),
        }
        assert_eq!(err.to_string(), "unexpected response: Internal Server Error (500)");
    }
}
