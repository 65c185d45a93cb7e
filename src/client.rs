use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::common::{self, bearer, DEFAULT_TIMEOUT};
use crate::error::{Error, MAX_ERROR_BODY_BYTES};
use crate::url_builder::UrlBuilder;

mod admin;
mod issue;

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    http: Option<HttpClient>,
    bearer_token: Option<String>,
}

impl ClientBuilder {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // routes carry their own leading slash
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
    /// [`ClientBuilder::timeout`].
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

    pub fn build(self) -> Result<Client, Error> {
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
        Ok(Client {
            base_url: self.base_url,
            http,
            bearer_token: self.bearer_token.filter(|token| !token.is_empty()),
        })
    }
}

/// Client for a hosted Talmi instance.
///
/// Immutable after construction and safe to share across threads; the
/// underlying connection pool is the only shared state.
pub struct Client {
    base_url: Url,
    pub(crate) http: HttpClient,
    bearer_token: Option<String>,
}

impl Client {
    pub fn builder(base_url: impl AsRef<str>) -> Result<ClientBuilder, Error> {
        ClientBuilder::new(base_url)
    }

    pub(crate) fn url(&self) -> UrlBuilder {
        UrlBuilder::new(self.base_url.clone())
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        self.dispatch(self.http.get(url))
    }

    #[allow(dead_code)]
    fn post<T, P>(&self, url: Url, payload: Option<&P>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut req = self.http.post(url);
        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(Error::Serialize)?;
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }
        self.dispatch(req)
    }

    fn dispatch<T: DeserializeOwned>(&self, mut req: RequestBuilder) -> Result<T, Error> {
        // inject the default credential if available
        if let Some(token) = &self.bearer_token {
            req = req.header(AUTHORIZATION, bearer(token));
        }
        let resp = req.send().map_err(Error::Connection)?;
        self.decode_response(resp)
    }

    pub(crate) fn decode_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T, Error> {
        let status = resp.status();
        if status.as_u16() >= 400 {
            return Err(self.parse_error(resp));
        }
        // read the whole body before decoding so the connection goes back to
        // the pool drained
        let body = resp.bytes().map_err(Error::Connection)?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    pub(crate) fn parse_error(&self, resp: Response) -> Error {
        let status = resp.status();
        match read_body_with_limit(resp, MAX_ERROR_BODY_BYTES) {
            Ok(body) => common::parse_error_from_body(status, &body),
            Err(err) => Error::UnreadableBody {
                status: status.as_u16(),
                reason: err.to_string(),
            },
        }
    }
}

fn read_body_with_limit(resp: Response, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    resp.take(limit as u64).read_to_end(&mut body)?;
    Ok(body)
}
