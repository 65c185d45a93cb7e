/// Optional parameters for issuing a token.
#[derive(Debug, Clone, Default)]
pub struct IssueTokenOptions {
    /// Provider to request the token from. When empty, any provider matching
    /// the policy is used. Only set this when you know the provider to use.
    pub requested_provider: String,
    /// Issuer to request the token from. When empty, any issuer matching the
    /// policy is used. Only set this when you know the issuer to use.
    pub requested_issuer: String,
}
