//! HTTP client for the Nexus search API.
//!
//! This module provides a thin HTTP client built on reqwest that talks to
//! the `/service/rest/v1/search` endpoint of a Nexus repository manager and
//! decodes one page of Docker component results at a time.

use crate::auth::Credentials;
use crate::error::{NxsError, Result};
use reqwest::{Client as ReqwestClient, Response};
use serde::{Deserialize, Deserializer};
use std::time::Duration;


/// Path of the search endpoint relative to the server URL.
pub const SEARCH_PATH: &str = "/service/rest/v1/search";

/// Component format requested from the search endpoint.
const DOCKER_FORMAT: &str = "docker";

/// One page of results from the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    /// Components matched on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Component>,
    /// Cursor for the next page; absent, null or empty on the last page
    #[serde(default, rename = "continuationToken")]
    pub continuation_token: Option<String>,
}

impl SearchPage {
    /// Returns the continuation token if another page follows this one.
    pub fn next_token(&self) -> Option<&str> {
        self.continuation_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// A Docker component (one image version) as reported by Nexus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

impl Component {
    /// Returns the sha256 of the first asset, or an empty string when the
    /// component has no assets or the first asset carries no checksum.
    pub fn primary_digest(&self) -> &str {
        self.assets
            .first()
            .and_then(|asset| asset.checksum.sha256.as_deref())
            .unwrap_or("")
    }
}

/// An asset attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub checksum: Checksum,
}

/// Checksums of an asset. Only sha256 is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Checksum {
    #[serde(default)]
    pub sha256: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libnxs::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(60)
///     .with_verify_tls(false);
/// assert!(!config.verify_tls);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
    /// Verify TLS certificates (default: true)
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Enables or disables TLS certificate verification.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

/// HTTP client for the Nexus search endpoint.
///
/// The client is immutable once built: server URL, TLS settings and
/// credentials are fixed at construction time.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Normalized server URL (e.g., "https://nexus.example.com")
    server_url: String,
    /// Credentials sent with every request
    credentials: Credentials,
    /// Request timeout, kept for error messages
    timeout_seconds: u64,
}

impl Client {
    /// Creates a new anonymous client with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnxs::client::Client;
    ///
    /// let client = Client::new("localhost:8081").unwrap();
    /// assert_eq!(client.server_url(), "http://localhost:8081");
    /// ```
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_config(server_url, ClientConfig::default())
    }

    /// Creates a new anonymous client with custom configuration.
    pub fn with_config(server_url: &str, config: ClientConfig) -> Result<Self> {
        let normalized_url = Self::normalize_url(server_url)?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| NxsError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            server_url: normalized_url,
            credentials: Credentials::Anonymous,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Returns a copy of this client that authenticates with `credentials`.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Normalizes a server URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(NxsError::validation("Server URL cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the normalized server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Returns the full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.server_url, SEARCH_PATH)
    }

    /// Returns the credentials this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetches a single page of Docker components matching `pattern`.
    ///
    /// Pass the continuation token of the previous page to fetch the next one.
    ///
    /// # Errors
    ///
    /// Returns a network error if the server cannot be reached, and a
    /// protocol error for non-2xx responses or bodies that do not decode.
    pub async fn fetch_search_page(
        &self,
        repository: &str,
        pattern: &str,
        continuation_token: Option<&str>,
    ) -> Result<SearchPage> {
        let url = self.search_url();

        let mut params = vec![
            ("repository", repository),
            ("format", DOCKER_FORMAT),
            ("name", pattern),
        ];
        if let Some(token) = continuation_token {
            params.push(("continuationToken", token));
        }

        tracing::debug!(%url, repository, pattern, ?continuation_token, "Requesting search page");

        let mut request = self.http_client.get(&url).query(&params);
        if let Some(auth_header) = self.credentials.to_header_value() {
            request = request.header(reqwest::header::AUTHORIZATION, auth_header);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.translate_reqwest_error(e))?;

        tracing::debug!(status = response.status().as_u16(), "Search response received");

        let response = Self::check_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| NxsError::network_with_source("Failed to read search response", e))?;

        serde_json::from_str(&body)
            .map_err(|e| NxsError::protocol_with_source("Failed to decode search response", e))
    }

    /// Translates a reqwest error into an NxsError.
    fn translate_reqwest_error(&self, error: reqwest::Error) -> NxsError {
        if error.is_timeout() {
            NxsError::network(format!(
                "Request to {} timed out after {} seconds",
                self.server_url, self.timeout_seconds
            ))
        } else if error.is_connect() {
            NxsError::network_with_source(
                format!("Failed to connect to Nexus at {}", self.server_url),
                error,
            )
        } else {
            NxsError::network_with_source(
                format!("Network error communicating with {}", self.server_url),
                error,
            )
        }
    }

    /// Checks the HTTP response status; every non-2xx status is a protocol error.
    async fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("(unable to read response body)"));

        Err(NxsError::protocol(
            format!("HTTP {} from {}: {}", status.as_u16(), url, error_body),
            Some(status.as_u16()),
        ))
    }
}
