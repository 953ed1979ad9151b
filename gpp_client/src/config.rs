//! Client configuration.
//!
//! Settings come either from a TOML file with a `[gpp]` table or from the
//! `GPP_API_URL`, `GPP_API_KEY` and `GPP_SCHEMA_PATH` environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "GPP_API_URL";
pub const ENV_API_KEY: &str = "GPP_API_KEY";
pub const ENV_SCHEMA_PATH: &str = "GPP_SCHEMA_PATH";

/// Configuration file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    gpp: ClientConfig,
}

/// Connection settings for the GPP GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: String,
    /// GraphQL SDL file used to check queries.
    pub schema_path: PathBuf,
}

impl ClientConfig {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        schema_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            schema_path: schema_path.into(),
        }
    }

    /// Load and validate configuration from a TOML file.
    ///
    /// ```toml
    /// [gpp]
    /// api_url = "https://gpp.example.org/odb"
    /// api_key = "..."
    /// schema_path = "schema.graphql"
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            ClientError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        file.gpp.validate()?;
        Ok(file.gpp)
    }

    /// Load and validate configuration from the environment.
    pub fn from_env() -> ClientResult<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| ClientError::Configuration(format!("{} must be set", name)))
        };

        let config = Self {
            api_url: var(ENV_API_URL)?,
            api_key: var(ENV_API_KEY)?,
            schema_path: PathBuf::from(var(ENV_SCHEMA_PATH)?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ClientError::Configuration(
                "'gpp.api_url' must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "'gpp.api_url' must use http or https: {}",
                url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ClientError::Configuration(
                "'gpp.api_key' must not be empty".to_string(),
            ));
        }
        if self.schema_path.as_os_str().is_empty() {
            return Err(ClientError::Configuration(
                "'gpp.schema_path' must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
