use serde::{Deserialize, Serialize};

/// Maximum number of error-response body bytes read before giving up.
pub(crate) const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Wire shape of a failure response body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ErrorResponse {
    pub error: String,
    pub correlation_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("marshaling payload: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),
    /// Server rejected the request and returned a structured error body.
    ///
    /// The `api error:` display prefix is load-bearing: existing integrations
    /// pattern-match on it.
    #[error("api error: '{message}' (correlation: {correlation_id})")]
    Api {
        message: String,
        correlation_id: String,
    },
    /// Server rejected the request with a body that is not an [`ErrorResponse`].
    #[error("api error: *unparsed '{body}' (status {status})")]
    ApiUnparsed { status: u16, body: String },
    #[error("request failed with status {status} and unreadable body: {reason}")]
    UnreadableBody { status: u16, reason: String },
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}
