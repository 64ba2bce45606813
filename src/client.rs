//! Reqwest-backed client for the SendGrid Web API v3.

use crate::transport::{RawResponse, Transport};
use crate::{Result, Statistics};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Async client for the SendGrid Web API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like the API key, proxies, timeouts, and a custom base URL. Cloning is cheap
/// and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings and no API key.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendgrid_stats::Client;
    /// # fn main() -> Result<(), sendgrid_stats::Error> {
    /// let client = Client::new()?;
    /// assert_eq!(client.base_url(), "https://api.sendgrid.com/v3");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// API root every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Statistics endpoints served through this client.
    pub fn statistics(&self) -> Statistics<'_, Client> {
        Statistics::new(self)
    }

    /// Full URL for a path relative to the API root.
    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

impl Transport for Client {
    fn get(&self, path_and_query: &str) -> impl Future<Output = Result<RawResponse>> + Send {
        let url = self.url(path_and_query);
        async move {
            debug!(%url, "GET");
            let response = self.http.get(&url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}

const BASE_URL: &str = "https://api.sendgrid.com/v3";
const USER_AGENT_VALUE: &str = concat!("sendgrid-stats/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring a SendGrid client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No API key
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `sendgrid-stats/<version>` user agent
    /// - `https://api.sendgrid.com/v3` base URL
    /// - 30 second request timeout
    pub fn new() -> Self {
        Self {
            api_key: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// API key sent as `Authorization: Bearer <key>` on every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API root.
    ///
    /// Useful for testing against a local mock server. A trailing slash is
    /// ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout covering connect, send and body download.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// No request is made; configuration errors (bad proxy URL, a key that
    /// is not a valid header value) are reported here.
    ///
    /// # Examples
    /// ```no_run
    /// # use sendgrid_stats::Client;
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), sendgrid_stats::Error> {
    /// let client = Client::builder()
    ///     .api_key("SG.xxxx")
    ///     .user_agent("my-app/1.0")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .default_headers(self.headers()?)
            .timeout(self.timeout);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            proxy: self.proxy,
        })
    }

    /// Headers sent with every request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}
