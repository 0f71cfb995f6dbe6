//! Configuration management with TOML and environment variable overrides.

use crate::error::Error;
use crate::transport::{Credentials, EmptyFieldPolicy, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Client configuration with layered loading.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Username issued by the service provider
    #[serde(default)]
    pub username: Option<String>,

    /// Password issued by the service provider; read from files, never written back
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Service base URL, without the operation path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How absent optional request fields are sent
    #[serde(default)]
    pub empty_fields: EmptyFieldPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            base_url: default_base_url(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            empty_fields: EmptyFieldPolicy::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("empty_fields", &self.empty_fields)
            .finish()
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default configuration with the given credentials.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: Some(username.into()), password: Some(password.into()), ..Self::default() }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("sunhotels.toml");
        if local_config.exists() {
            debug!("Found sunhotels.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sunhotels").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(username) = std::env::var("SUNHOTELS_USERNAME") {
            self.username = Some(username);
        }

        if let Ok(password) = std::env::var("SUNHOTELS_PASSWORD") {
            self.password = Some(password);
        }

        if let Ok(base_url) = std::env::var("SUNHOTELS_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("SUNHOTELS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("SUNHOTELS_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }

    /// Returns the configured credentials, failing if either half is missing.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() => Ok(Credentials::new(user, pass)),
            _ => Err(Error::Config(
                "username and password are required (set SUNHOTELS_USERNAME / SUNHOTELS_PASSWORD)"
                    .to_string(),
            )),
        }
    }
}
