//! Request gateway core: URL construction, credential injection, and
//! response handling shared by every operation.
//!
//! Operations live in sibling modules as further `impl ApiClient` blocks,
//! grouped by remote capability.

use std::time::Duration;

use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::application::credential::CredentialStore;
use crate::domain::Credential;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::api::ApiConfig;

/// Versioned prefix every REST path lives under.
pub const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Whether a request carries the bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Anonymous,
}

/// HTTP client for the bot management service.
///
/// Reads the credential from the shared [`CredentialStore`] at the moment
/// each request is built, so changing the credential affects only requests
/// issued afterwards. No retries, no caching.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    store: CredentialStore,
}

impl ApiClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(base_url: Url, store: CredentialStore) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
            store,
        }
    }

    /// Create a client with timeouts and base URL from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &ApiConfig, store: CredentialStore) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url: config.base_url()?,
            store,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Set or remove the credential attached to subsequent requests.
    ///
    /// Requests already in flight keep whatever they were built with.
    pub fn set_auth_header(&self, token: Option<Credential>) {
        self.store.replace(token);
    }

    /// Absolute URL for `/api/v1/<segments..>`.
    ///
    /// Segments are percent-encoded but otherwise passed through untouched.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::Config(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: format!("{} cannot be a base URL", self.base_url),
                })
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
    ) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        debug!(%method, path = %url.path(), ?auth, "Building request");

        let builder = self.http.request(method, url);
        Ok(match (auth, self.store.get()) {
            (Auth::Bearer, Some(token)) => {
                builder.header(reqwest::header::AUTHORIZATION, token.bearer())
            }
            _ => builder,
        })
    }

    /// Send a prepared request and return the JSON body.
    ///
    /// Non-2xx statuses become [`Error::Remote`] carrying the status and raw
    /// body. An empty successful body resolves to `Value::Null`.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_owned();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), path = %url, "Remote rejected request");
            return Err(Error::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), path = %url, bytes = bytes.len(), "Request completed");
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get(&self, segments: &[&str]) -> Result<Value> {
        self.send(self.request(Method::GET, segments, Auth::Bearer)?)
            .await
    }

    pub(crate) async fn get_query<Q>(&self, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, segments, Auth::Bearer)?.query(query);
        self.send(builder).await
    }

    pub(crate) async fn post(&self, segments: &[&str]) -> Result<Value> {
        self.send(self.request(Method::POST, segments, Auth::Bearer)?)
            .await
    }

    pub(crate) async fn post_json<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, segments, Auth::Bearer)?.json(body);
        self.send(builder).await
    }

    pub(crate) async fn put_json<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, segments, Auth::Bearer)?.json(body);
        self.send(builder).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<Value> {
        self.send(self.request(Method::DELETE, segments, Auth::Bearer)?)
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
