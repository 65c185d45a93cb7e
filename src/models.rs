use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Authenticated identity of the original caller, established by a trusted
/// issuer after verifying an upstream token. Only ever read by this client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Unique subject identifier, e.g. an email address or `sub` claim.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Name of the issuer that vouched for this principal.
    #[serde(rename = "Issuer", default)]
    pub issuer: String,
    /// Claims extracted from the upstream token.
    #[serde(rename = "Attributes", default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

/// One immutable historical record of a request the server handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique request id (`X-Correlation-ID`).
    #[serde(default)]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// What happened, e.g. `token.mint` or `auth.success`.
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub requested_provider: String,
    #[serde(rename = "issuer", default, skip_serializing_if = "String::is_empty")]
    pub requested_issuer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub policy_name: String,
    /// Provider actually used for the decision.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(default)]
    pub granted: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Lifecycle state of a previously issued token. Whether a token is "active"
/// is decided server-side from `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Id of both the token and the request that created it.
    #[serde(rename = "CorrelationID", default)]
    pub correlation_id: String,
    #[serde(rename = "PrincipalID", default)]
    pub principal_id: String,
    #[serde(rename = "Provider", default)]
    pub provider: String,
    #[serde(rename = "ExpiresAt", with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(rename = "IssuedAt", with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    /// Extra details such as scope or a GitHub installation id.
    #[serde(rename = "Metadata", default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A freshly minted token. `value` is the secret itself; it is handed to the
/// caller exactly once and never logged or persisted by the client.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenArtifact {
    #[serde(default)]
    pub value: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// Extra information, e.g. `"git_user": "x-access-token"`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl fmt::Debug for TokenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenArtifact")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("metadata", &self.metadata)
            .finish()
    }
}
