//! Server routes consumed by this client.
//!
//! Every route starts with a `/`; the client strips any trailing `/` from the
//! configured base address, so joining the two never doubles a separator.

/// POST. Exchanges an upstream token for a freshly minted token.
pub const ISSUE_TOKEN_ROUTE: &str = "/api/v1/token/issue";

/// GET. Returns the most recent audit entries.
pub const LIST_AUDITS_ROUTE: &str = "/api/v1/admin/audits";

/// GET. Returns tokens that have not yet expired.
pub const LIST_ACTIVE_TOKENS_ROUTE: &str = "/api/v1/admin/tokens/active";
