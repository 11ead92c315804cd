//! Search aggregation.
//!
//! Pages through the Nexus search endpoint once per name pattern and
//! collapses the results into a flat list of [`SearchRecord`]s, one per
//! unique `(name, version)` pair across every pattern of the invocation.

use crate::client::{Client, Component, SearchPage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;


/// A single image version found by a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Image name (e.g., "team/app")
    pub name: String,
    /// Tag of this version (e.g., "42" or "latest")
    pub version: String,
    /// sha256 of the primary asset; empty when Nexus reported none
    #[serde(rename = "sha256")]
    pub digest: String,
}

impl SearchRecord {
    /// Creates a new search record.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        digest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            digest: digest.into(),
        }
    }

    fn from_component(component: &Component) -> Self {
        Self::new(
            component.name.as_str(),
            component.version.as_str(),
            component.primary_digest(),
        )
    }
}

/// Lazy sequence of result pages for one pattern.
///
/// Each call to [`Pages::next_page`] issues at most one request. The sequence
/// ends after the first page without a continuation token, or after the
/// first error, and cannot be restarted.
pub struct Pages<'a> {
    client: &'a Client,
    repository: &'a str,
    pattern: &'a str,
    next_token: Option<String>,
    finished: bool,
}

impl<'a> Pages<'a> {
    /// Creates the page sequence for `pattern` in `repository`.
    pub fn new(client: &'a Client, repository: &'a str, pattern: &'a str) -> Self {
        Self {
            client,
            repository,
            pattern,
            next_token: None,
            finished: false,
        }
    }

    /// Fetches the next page, or returns `Ok(None)` once the sequence is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<SearchPage>> {
        if self.finished {
            return Ok(None);
        }

        if let Some(token) = &self.next_token {
            tracing::debug!(pattern = self.pattern, token = %token, "Fetching next page");
        }

        let page = match self
            .client
            .fetch_search_page(self.repository, self.pattern, self.next_token.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        self.next_token = page.next_token().map(str::to_string);
        if self.next_token.is_none() {
            tracing::debug!(pattern = self.pattern, "No more pages to fetch");
            self.finished = true;
        }

        Ok(Some(page))
    }

    /// Returns true once no further page will be fetched.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Accumulates records across pages and patterns, dropping repeated
/// `(name, version)` pairs.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<(String, String)>,
    records: Vec<SearchRecord>,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every component of `page`, in page order, skipping pairs already seen.
    ///
    /// Returns the number of records actually added.
    pub fn ingest(&mut self, page: &SearchPage) -> usize {
        let before = self.records.len();
        for component in &page.items {
            let key = (component.name.clone(), component.version.clone());
            if self.seen.contains(&key) {
                tracing::debug!(
                    name = %component.name,
                    version = %component.version,
                    "Skipping duplicate image"
                );
                continue;
            }
            self.seen.insert(key);
            self.records.push(SearchRecord::from_component(component));
        }
        self.records.len() - before
    }

    /// Number of unique records collected so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record has been collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the aggregator, returning records in first-seen order.
    pub fn into_records(self) -> Vec<SearchRecord> {
        self.records
    }
}

/// Searches `repository` for every pattern in turn and returns the
/// deduplicated records.
///
/// Patterns are processed sequentially and pages within a pattern are
/// fetched in order. The first failure aborts the whole search and every
/// record collected so far is discarded.
///
/// # Examples
///
/// ```no_run
/// use libnxs::client::Client;
///
/// # async fn example() -> libnxs::Result<()> {
/// let client = Client::new("http://localhost:8081")?;
/// let records = libnxs::search::search(&client, "docker-hosted", &["team/*"]).await?;
/// for record in records {
///     println!("{}:{} {}", record.name, record.version, record.digest);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<S: AsRef<str>>(
    client: &Client,
    repository: &str,
    patterns: &[S],
) -> Result<Vec<SearchRecord>> {
    let mut aggregator = Aggregator::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        tracing::debug!(pattern, "Searching with pattern");

        let mut pages = Pages::new(client, repository, pattern);
        while let Some(page) = pages.next_page().await? {
            let added = aggregator.ingest(&page);
            tracing::debug!(
                pattern,
                components = page.items.len(),
                added,
                "Processed page"
            );
        }
    }

    tracing::debug!(total = aggregator.len(), "Search complete");
    Ok(aggregator.into_records())
}
