//! High-level API for the nxs library.
//!
//! [`Nexus`] bundles a configured [`Client`] with the repository to search
//! and runs the aggregator and the tag filter in sequence.
//!
//! # Examples
//!
//! ```no_run
//! use libnxs::{Credentials, Nexus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let nexus = Nexus::builder()
//!         .server_url("https://nexus.example.com")
//!         .repository("docker-hosted")
//!         .with_credentials(Credentials::basic("admin", "secret"))
//!         .build()?;
//!
//!     let images = nexus.search_and_filter(&["team/*"]).await?;
//!     for (name, tags) in images {
//!         println!("{}: {}", name, tags.join(", "));
//!     }
//!     Ok(())
//! }
//! ```

use crate::auth::Credentials;
use crate::client::{Client, ClientConfig};
use crate::error::{NxsError, Result};
use crate::filter::{EmptyGroups, FilteredResult, filter_with};
use crate::search::{SearchRecord, search};

/// Handle on one Docker repository of a Nexus server.
///
/// All settings are fixed when the handle is built; it holds no mutable state
/// and can be shared freely.
#[derive(Debug, Clone)]
pub struct Nexus {
    client: Client,
    repository: String,
}

impl Nexus {
    /// Creates an anonymous handle with default client settings.
    pub fn connect(server_url: &str, repository: &str) -> Result<Self> {
        Self::builder()
            .server_url(server_url)
            .repository(repository)
            .build()
    }

    /// Create a builder for advanced configuration.
    pub fn builder() -> NexusBuilder {
        NexusBuilder::new()
    }

    /// Returns the normalized server URL.
    pub fn server_url(&self) -> &str {
        self.client.server_url()
    }

    /// Returns the repository being searched.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Searches every pattern and returns the deduplicated records.
    ///
    /// See [`crate::search::search`].
    pub async fn search<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<SearchRecord>> {
        search(&self.client, &self.repository, patterns).await
    }

    /// Searches every pattern and filters the results into per-image tag lists.
    pub async fn search_and_filter<S: AsRef<str>>(&self, patterns: &[S]) -> Result<FilteredResult> {
        self.search_and_filter_with(patterns, EmptyGroups::default())
            .await
    }

    /// Like [`Nexus::search_and_filter`], with an explicit policy for images
    /// whose tag list filters down to nothing.
    pub async fn search_and_filter_with<S: AsRef<str>>(
        &self,
        patterns: &[S],
        empty_groups: EmptyGroups,
    ) -> Result<FilteredResult> {
        let records = self.search(patterns).await?;
        if records.is_empty() {
            tracing::debug!("No images found matching the patterns");
            return Ok(FilteredResult::new());
        }
        Ok(filter_with(&records, empty_groups))
    }
}

/// Builder for creating a [`Nexus`] handle.
#[derive(Debug, Default)]
pub struct NexusBuilder {
    server_url: Option<String>,
    repository: Option<String>,
    credentials: Credentials,
    client_config: ClientConfig,
}

impl NexusBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL.
    pub fn server_url(mut self, url: &str) -> Self {
        self.server_url = Some(url.to_string());
        self
    }

    /// Set the Docker repository to search.
    pub fn repository(mut self, repository: &str) -> Self {
        self.repository = Some(repository.to_string());
        self
    }

    /// Set credentials for authentication.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set HTTP client settings (timeout, TLS verification).
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    /// Build the [`Nexus`] handle.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the server URL or repository is missing
    /// or empty, and a network error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Nexus> {
        let server_url = self
            .server_url
            .ok_or_else(|| NxsError::validation("Server URL is required"))?;
        let repository = self
            .repository
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| NxsError::validation("Repository name is required"))?;

        tracing::debug!(
            server = %server_url,
            repository = %repository,
            authenticated = self.credentials.is_authenticated(),
            verify_tls = self.client_config.verify_tls,
            "Initializing Nexus client"
        );

        let client =
            Client::with_config(&server_url, self.client_config)?.with_credentials(self.credentials);

        Ok(Nexus { client, repository })
    }
}
