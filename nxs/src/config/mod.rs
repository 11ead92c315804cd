use crate::format::{ColorChoice, OutputFormat};
use libnxs::EmptyGroups;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Nexus server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Style configuration
    #[serde(default)]
    pub style: StyleConfig,
    /// Tag filter configuration
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Server configuration section
///
/// Passwords are deliberately absent: they come from `--password`,
/// `NXS_PASSWORD` or an interactive prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Nexus server URL
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Docker repository to search
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Username for Basic authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Verify TLS certificates
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_server_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_repository() -> String {
    "my-private-docker-repo".to_string()
}

fn default_verify_ssl() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            repository: default_repository(),
            username: None,
            verify_ssl: default_verify_ssl(),
            timeout: default_timeout(),
        }
    }
}

/// Style configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleConfig {
    /// Output format: json, yaml, pretty
    #[serde(default)]
    pub format: OutputFormat,
    /// Color output control: auto, always, never
    #[serde(default)]
    pub color: ColorChoice,
}

/// Tag filter configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Images whose tag list filters down to nothing: keep or omit
    #[serde(default)]
    pub empty_groups: EmptyGroups,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from a file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path).map_err(|e| format!("{} ({})", e, path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, toml_str).map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }
}

/// Get the config file path, respecting NXS_CONFIG environment variable
pub fn get_config_path() -> PathBuf {
    if let Ok(config_path) = env::var("NXS_CONFIG") {
        return PathBuf::from(config_path);
    }

    // Default to ~/.config/nxs/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("nxs").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

/// Validate a Nexus server URL
///
/// A missing scheme defaults to `http://`. Returns the normalized URL string.
pub fn validate_server_url(url_str: &str) -> Result<String, String> {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return Err("Nexus URL is required".to_string());
    }

    let url_to_parse = if url_str.contains("://") {
        url_str.to_string()
    } else {
        format!("http://{}", url_str)
    };

    let parsed_url =
        Url::parse(&url_to_parse).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match parsed_url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            ));
        }
    }

    if parsed_url.host_str().is_none() {
        return Err(format!("Invalid URL '{}': missing host", url_str));
    }

    Ok(parsed_url.to_string())
}
