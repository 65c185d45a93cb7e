use reqwest::header::AUTHORIZATION;

use super::Client;
use crate::common::bearer;
use crate::error::Error;
use crate::models::TokenArtifact;
use crate::options::IssueTokenOptions;
use crate::routes::ISSUE_TOKEN_ROUTE;

impl Client {
    /// Requests a new token, authorized by the caller-supplied upstream token.
    ///
    /// The request is built by hand rather than through the shared dispatch
    /// path: the server matches policy against the `Authorization` header, so
    /// it must carry the upstream token and never the client's default
    /// credential.
    pub fn issue_token(
        &self,
        token: &str,
        opts: &IssueTokenOptions,
    ) -> Result<TokenArtifact, Error> {
        let url = self
            .url()
            .set_path(ISSUE_TOKEN_ROUTE)
            .add_query_param_not_empty("issuer", opts.requested_issuer.as_str())
            .add_query_param_not_empty("provider", opts.requested_provider.as_str())
            .build();
        let req = self.http.post(url).header(AUTHORIZATION, bearer(token));
        let resp = req.send().map_err(Error::Connection)?;
        self.decode_response(resp)
    }
}
