//! Startup configuration.
//!
//! The catalog location comes from `--catalog`, then `STUDY_CATALOG`, then
//! `subjects.csv` in the working directory. An optional model API key is read
//! from `OPENAI_API_KEY` or from a TOML secrets file:
//!
//! ```toml
//! [openai]
//! OPENAI_API_KEY = "sk-..."
//! ```
//!
//! A secrets file named by `STUDY_SECRETS` must parse. One found in the
//! default config directory is skipped with a warning when it does not.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::DEFAULT_CATALOG_FILE;

pub const APP_DIR_NAME: &str = "study-assistant";
pub const SECRETS_FILE_NAME: &str = "secrets.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read secrets file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed secrets file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    openai: Option<OpenAiSecrets>,
}

#[derive(Debug, Deserialize)]
struct OpenAiSecrets {
    #[serde(rename = "OPENAI_API_KEY")]
    api_key: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub secrets_path: Option<PathBuf>,
    api_key: Option<String>,
}

// Never print the key itself
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("catalog_path", &self.catalog_path)
            .field("secrets_path", &self.secrets_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn load(catalog_flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_sources(catalog_flag, |key| std::env::var(key).ok())
    }

    /// Resolves configuration with an explicit environment lookup.
    pub fn from_sources<F>(catalog_flag: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(catalog_flag, env, default_secrets_path())
    }

    fn resolve<F>(
        catalog_flag: Option<PathBuf>,
        env: F,
        default_secrets: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = catalog_flag
            .or_else(|| env("STUDY_CATALOG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));

        let explicit_secrets = env("STUDY_SECRETS").map(PathBuf::from);
        let secrets_explicit = explicit_secrets.is_some();
        let secrets_path = explicit_secrets.or(default_secrets);

        let api_key = match env("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            Some(key) => Some(key),
            None => match &secrets_path {
                Some(path) if secrets_explicit => read_api_key(path)?,
                // Unreadable default file: no key
                Some(path) => read_api_key(path).unwrap_or_else(|e| {
                    warn!(error = %e, "ignoring secrets file");
                    None
                }),
                None => None,
            },
        };

        debug!(
            catalog = %catalog_path.display(),
            api_key_configured = api_key.is_some(),
            "configuration resolved"
        );

        Ok(Self {
            catalog_path,
            secrets_path,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn default_secrets_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SECRETS_FILE_NAME))
}

fn read_api_key(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no secrets file");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let secrets: SecretsFile = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(secrets
        .openai
        .and_then(|o| o.api_key)
        .filter(|k| !k.is_empty()))
}
