use super::AsyncClient;
use crate::error::Error;
use crate::models::{AuditEntry, TokenMetadata};
use crate::routes::{LIST_ACTIVE_TOKENS_ROUTE, LIST_AUDITS_ROUTE};

impl AsyncClient {
    /// Retrieves the latest audit entries, limited to the given number.
    /// Entries come back in whatever order the server returns them.
    pub async fn list_audits(&self, limit: u32) -> Result<Vec<AuditEntry>, Error> {
        let url = self
            .url()
            .set_path(LIST_AUDITS_ROUTE)
            .add_query_param("limit", limit)
            .build();
        self.get(url).await
    }

    /// Retrieves the currently active tokens. Expiry filtering happens
    /// server-side.
    pub async fn list_active_tokens(&self) -> Result<Vec<TokenMetadata>, Error> {
        let url = self.url().set_path(LIST_ACTIVE_TOKENS_ROUTE).build();
        self.get(url).await
    }
}
