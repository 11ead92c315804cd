//! Error types for nxs
//!
//! Every failure of a search is fatal: the first network or protocol error
//! aborts the whole invocation and no partial results are returned.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for nxs operations
#[derive(Error, Debug)]
pub enum NxsError {
    /// Network-related errors (connection, timeout, DNS, TLS)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Protocol errors (non-2xx status, undecodable response body)
    #[error("Protocol error (status: {status_code:?}): {message}")]
    Protocol {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors (empty server URL, missing repository, etc.)
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for nxs operations
pub type Result<T> = std::result::Result<T, NxsError>;

impl NxsError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnxs::error::NxsError;
    ///
    /// let err = NxsError::network("connection refused");
    /// assert!(matches!(err, NxsError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new protocol error for an unexpected HTTP status.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnxs::error::NxsError;
    ///
    /// let err = NxsError::protocol("HTTP 500: boom", Some(500));
    /// assert_eq!(err.status_code(), Some(500));
    /// ```
    pub fn protocol<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::Protocol {
            message: message.into(),
            status_code,
            source: None,
        }
    }

    /// Creates a new protocol error with a source error (typically a decode failure).
    pub fn protocol_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Protocol {
            message: message.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code carried by a protocol error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Protocol { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
