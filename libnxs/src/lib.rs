//! nxs - Nexus Docker image search library
//!
//! libnxs queries the search API of a Nexus repository manager for Docker
//! images matching name patterns, deduplicates what it finds, and reduces
//! each image to a short list of tags: the two highest versions, preceded by
//! `latest` when it points at the same content as the highest one.
//!
//! # Quick Start
//!
//! ```no_run
//! use libnxs::Nexus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let nexus = Nexus::connect("http://localhost:8081", "docker-hosted")?;
//!
//!     // Every (name, version) pair found, deduplicated
//!     let records = nexus.search(&["team/*"]).await?;
//!     println!("Found {} image versions", records.len());
//!
//!     // Latest plus top versions per image
//!     let images = nexus.search_and_filter(&["team/*"]).await?;
//!     for (name, tags) in images {
//!         println!("{}: {}", name, tags.join(", "));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Nexus`] - Main entry point
//! - [`NexusBuilder`] - Builder for credentials and client settings
//! - [`SearchRecord`] - One image version found by a search
//! - [`FilteredResult`] - Filtered tags per image
//! - [`Credentials`] - Authentication credentials
//!
//! The building blocks ([`client`], [`search`], [`filter`]) are public for
//! callers that need to drive a step on its own, such as filtering records
//! loaded from a file.

#![warn(clippy::all)]

/// Returns the libnxs crate version.
///
/// # Examples
///
/// ```
/// let version = libnxs::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

mod nexus;
pub use nexus::{Nexus, NexusBuilder};

pub use auth::Credentials;
pub use client::{Client, ClientConfig};
pub use error::{NxsError, Result};
pub use filter::{EmptyGroups, FilteredResult};
pub use search::SearchRecord;

pub mod auth;
pub mod client;
pub mod error;
pub mod filter;
pub mod search;
