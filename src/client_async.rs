use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::common::{self, bearer, DEFAULT_TIMEOUT};
use crate::error::{Error, MAX_ERROR_BODY_BYTES};
use crate::url_builder::UrlBuilder;

mod admin;
mod issue;

/// Builder for [`AsyncClient`].
///
/// Available when the `async-client` feature is enabled. The `base_url`
/// should point to the root of the hosted Talmi instance; any trailing `/`
/// is stripped because the routes carry their own leading one.
pub struct AsyncClientBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    http: Option<HttpClient>,
    bearer_token: Option<String>,
}

impl AsyncClientBuilder {
    /// Creates a builder for the provided base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        let trimmed = base_url.path().trim_end_matches('/').to_string();
        base_url.set_path(&trimmed);
        Ok(Self {
            base_url,
            timeout: Some(DEFAULT_TIMEOUT),
            http: None,
            bearer_token: None,
        })
    }

    /// Sets the request timeout for the underlying HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies a pre-configured transport. Its own timeout settings win over
    /// [`AsyncClientBuilder::timeout`].
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the default credential sent as `Authorization: Bearer <token>` on
    /// every request except token issuance. An empty token means
    /// unauthenticated.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<AsyncClient, Error> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = HttpClient::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };
        Ok(AsyncClient {
            base_url: self.base_url,
            http,
            bearer_token: self.bearer_token.filter(|token| !token.is_empty()),
        })
    }
}

/// Async client for a hosted Talmi instance.
///
/// Immutable after construction and safe to share across tasks. Each
/// operation suspends exactly once, on the network exchange; dropping the
/// returned future (for example by racing it against a timeout) aborts the
/// in-flight request, which surfaces as [`Error::Connection`].
pub struct AsyncClient {
    base_url: Url,
    pub(crate) http: HttpClient,
    bearer_token: Option<String>,
}

impl AsyncClient {
    pub fn builder(base_url: impl AsRef<str>) -> Result<AsyncClientBuilder, Error> {
        AsyncClientBuilder::new(base_url)
    }

    pub(crate) fn url(&self) -> UrlBuilder {
        UrlBuilder::new(self.base_url.clone())
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        self.dispatch(self.http.get(url)).await
    }

    #[allow(dead_code)]
    async fn post<T, P>(&self, url: Url, payload: Option<&P>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut req = self.http.post(url);
        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(Error::Serialize)?;
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }
        self.dispatch(req).await
    }

    async fn dispatch<T: DeserializeOwned>(&self, mut req: RequestBuilder) -> Result<T, Error> {
        if let Some(token) = &self.bearer_token {
            req = req.header(AUTHORIZATION, bearer(token));
        }
        let resp = req.send().await.map_err(Error::Connection)?;
        self.decode_response(resp).await
    }

    pub(crate) async fn decode_response<T: DeserializeOwned>(
        &self,
        resp: Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.as_u16() >= 400 {
            return Err(self.parse_error(resp).await);
        }
        let body = resp.bytes().await.map_err(Error::Connection)?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    pub(crate) async fn parse_error(&self, resp: Response) -> Error {
        let status = resp.status();
        match read_body_with_limit(resp, MAX_ERROR_BODY_BYTES).await {
            Ok(body) => common::parse_error_from_body(status, &body),
            Err(err) => Error::UnreadableBody {
                status: status.as_u16(),
                reason: err.to_string(),
            },
        }
    }
}

async fn read_body_with_limit(mut resp: Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let remaining = limit - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
