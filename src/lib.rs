#![forbid(unsafe_code)]

mod client;
#[cfg(feature = "async-client")]
mod client_async;
mod common;
mod error;
mod models;
mod options;
mod routes;
mod url_builder;

pub use client::{Client, ClientBuilder};
#[cfg(feature = "async-client")]
pub use client_async::{AsyncClient, AsyncClientBuilder};
pub use error::{Error, ErrorResponse};
pub use models::{AuditEntry, Principal, TokenArtifact, TokenMetadata};
pub use options::IssueTokenOptions;
pub use routes::{ISSUE_TOKEN_ROUTE, LIST_ACTIVE_TOKENS_ROUTE, LIST_AUDITS_ROUTE};
