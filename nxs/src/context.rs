//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables (read by clap alongside the flags)
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use crate::config::{self, Config};
use crate::format::{ColorChoice, OutputFormat};
use libnxs::EmptyGroups;
use std::path::Path;

/// Verbosity of diagnostic output, from `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// No diagnostics beyond errors and results
    #[default]
    Normal,
    /// -v: progress of the search
    Verbose,
    /// -vv: requests and pages
    VeryVerbose,
    /// -vvv: everything
    Trace,
}

impl VerbosityLevel {
    /// Map the number of `-v` flags to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::VeryVerbose,
            _ => Self::Trace,
        }
    }

    /// Default tracing filter directive for this level, used when RUST_LOG is unset
    pub fn tracing_directive(self) -> &'static str {
        match self {
            Self::Normal => "warn",
            Self::Verbose => "warn,libnxs=info,nxs=info",
            Self::VeryVerbose => "warn,libnxs=debug,nxs=debug",
            Self::Trace => "trace",
        }
    }
}

/// Values supplied on the command line or through environment variables.
///
/// `None` means "not given", so the config file value stays in effect.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub repository: Option<String>,
    pub username: Option<String>,
    pub verify_ssl: Option<bool>,
    pub timeout: Option<u64>,
    pub format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
    pub empty_groups: Option<EmptyGroups>,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    /// Diagnostic verbosity
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context from the default config file location
    pub fn build(overrides: &Overrides, verbosity: VerbosityLevel) -> Result<Self, String> {
        Self::build_from(&config::get_config_path(), overrides, verbosity)
    }

    /// Build context from an explicit config file path
    pub fn build_from(
        config_path: &Path,
        overrides: &Overrides,
        verbosity: VerbosityLevel,
    ) -> Result<Self, String> {
        // 1-2. Defaults, then the config file if present
        let mut config = Config::load_or_default(config_path)?;

        // 3-4. Environment and flags
        if let Some(url) = &overrides.url {
            config.server.url = url.clone();
        }
        if let Some(repository) = &overrides.repository {
            config.server.repository = repository.clone();
        }
        if let Some(username) = &overrides.username {
            config.server.username = Some(username.clone());
        }
        if let Some(verify_ssl) = overrides.verify_ssl {
            config.server.verify_ssl = verify_ssl;
        }
        if let Some(timeout) = overrides.timeout {
            config.server.timeout = timeout;
        }
        if let Some(format) = overrides.format {
            config.style.format = format;
        }
        if let Some(color) = overrides.color {
            config.style.color = color;
        }
        if let Some(empty_groups) = overrides.empty_groups {
            config.filter.empty_groups = empty_groups;
        }

        tracing::debug!(path = %config_path.display(), "Resolved configuration");
        Ok(Self { config, verbosity })
    }

    /// Context with default configuration, ignoring any config file
    #[cfg(test)]
    pub fn with_defaults(verbosity: VerbosityLevel) -> Self {
        Self {
            config: Config::default(),
            verbosity,
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
