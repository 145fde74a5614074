//! Bridge configuration and its `config.yml` loader.
//!
//! ```yaml
//! auth-server: main
//! secret-key: change_me
//! ```
//!
//! Loaded once at startup and read-only afterwards.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name inside the plugin data directory.
pub const CONFIG_FILE: &str = "config.yml";

/// Backend trusted to report logins when nothing is configured.
pub const DEFAULT_AUTH_SERVER: &str = "main";

/// Secret shipped in a fresh `config.yml`. Must be changed on both sides.
pub const DEFAULT_SECRET_KEY: &str = "change_me";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("validation: {0}")]
    Validation(String),
}

/// What the bridge needs to know about its deployment.
///
/// Missing keys fall back to the defaults, and camelCase spellings
/// (`authServer`, `secretKey`) are accepted alongside the kebab-case ones.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Name of the backend whose login reports are authoritative.
    #[serde(alias = "authServer")]
    auth_server: String,

    /// Shared secret every inbound message must carry.
    #[serde(alias = "secretKey")]
    secret_key: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            auth_server: DEFAULT_AUTH_SERVER.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("auth_server", &self.auth_server)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl BridgeConfig {
    pub fn new(
        auth_server: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            auth_server: auth_server.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn auth_server(&self) -> &str {
        &self.auth_server
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml(data: &str) -> Result<Self, ConfigError> {
        let config: Self = if data.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(data)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Loads `config.yml` from `data_dir`, then writes it back.
    ///
    /// Writing back fills in any keys the operator left out, and on first
    /// start creates the directory and a file holding the defaults.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.as_ref();
        let path = data_dir.join(CONFIG_FILE);

        let config = if path.exists() {
            Self::from_yaml(&fs::read_to_string(&path)?)?
        } else {
            tracing::info!(path = %path.display(), "no config found, writing defaults");
            Self::default()
        };

        fs::create_dir_all(data_dir)?;
        fs::write(&path, config.to_yaml()?)?;

        if config.secret_key == DEFAULT_SECRET_KEY {
            tracing::warn!(
                path = %path.display(),
                "secret-key is still the default, change it here and on the auth server"
            );
        }
        tracing::info!(auth_server = %config.auth_server, "configuration loaded");
        Ok(config)
    }

    /// Rejects values the bridge cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_server.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth-server must not be empty".into(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::Validation(
                "secret-key must not be empty".into(),
            ));
        }
        Ok(())
    }
}
