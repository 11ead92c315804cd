//! Authentication handling for the Nexus search API.
//!
//! Nexus accepts anonymous access or HTTP Basic authentication.


/// Credentials for Nexus authentication.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No authentication (anonymous access)
    #[default]
    Anonymous,

    /// HTTP Basic authentication with username and password
    Basic {
        /// Username for authentication
        username: String,
        /// Password for authentication
        password: String,
    },
}

impl Credentials {
    /// Creates anonymous credentials.
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnxs::auth::Credentials;
    ///
    /// let creds = Credentials::basic("username", "password");
    /// assert!(creds.to_header_value().is_some());
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds credentials from an optional username and password.
    ///
    /// Basic authentication is only used when both values are present and
    /// non-empty; anything else falls back to anonymous access.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnxs::auth::Credentials;
    ///
    /// assert_eq!(Credentials::from_parts(Some("admin"), None), Credentials::Anonymous);
    /// assert_eq!(Credentials::from_parts(Some(""), Some("x")), Credentials::Anonymous);
    /// assert!(Credentials::from_parts(Some("admin"), Some("secret")).is_authenticated());
    /// ```
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Self {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Self::basic(u, p),
            _ => Self::Anonymous,
        }
    }

    /// Returns true unless these are anonymous credentials.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Returns the Authorization header value for these credentials.
    pub fn to_header_value(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Basic { username, password } => {
                use base64::{Engine as _, engine::general_purpose};
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials);
                Some(format!("Basic {}", encoded))
            }
        }
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
