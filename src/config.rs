//! Configuration management for the Rhapsody SDK and CLI.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//!
//! - Linux: `~/.local/share/rhapcli/.env`
//! - macOS: `~/Library/Application Support/rhapcli/.env`
//! - Windows: `%LOCALAPPDATA%/rhapcli/.env`
//!
//! Variables already present in the environment take precedence over the
//! file.

use std::{env, path::PathBuf};

use crate::error::{Result, SdkError};

pub const DEFAULT_API_URL: &str = "https://api.rhapsody.com";
pub const DEFAULT_IMAGE_URL: &str =
    "http://direct.rhapsody.com/imageserver/v2/artists/{artist_id}/images/{size}.png";

const ENV_API_KEY: &str = "RHAPSODY_API_KEY";
const ENV_API_SECRET: &str = "RHAPSODY_API_SECRET";
const ENV_API_URL: &str = "RHAPSODY_API_URL";
const ENV_IMAGE_URL: &str = "RHAPSODY_IMAGE_URL";
const ENV_PASSWORD: &str = "RHAPSODY_PASSWORD";

/// Loads environment variables from `rhapcli/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// the configuration may come entirely from the process environment.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Directory holding the `.env` file and the JSON authorization store.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("rhapcli");
    path
}

/// Directory holding the preferences authorization store.
pub fn preferences_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("rhapcli");
    path
}

/// Password for `rhapcli auth login` when not given on the command line.
pub fn password() -> Option<String> {
    env::var(ENV_PASSWORD).ok().filter(|p| !p.is_empty())
}

/// Connection settings of the SDK.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// The app API key from the Rhapsody developer portal.
    pub api_key: String,
    /// The app API secret from the Rhapsody developer portal.
    pub api_secret: String,
    pub api_url: String,
    /// Artist image template containing `{artist_id}` and `{size}`.
    pub image_url: String,
}

impl SdkConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Reads the configuration from the `RHAPSODY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Configuration`] if the API key or secret is not set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(required(ENV_API_KEY)?, required(ENV_API_SECRET)?);
        if let Ok(url) = env::var(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Ok(url) = env::var(ENV_IMAGE_URL) {
            config = config.with_image_url(url);
        }
        Ok(config)
    }

    /// Checks that the app credentials are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::Configuration("API key must not be empty".into()));
        }
        if self.api_secret.trim().is_empty() {
            return Err(SdkError::Configuration(
                "API secret must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| SdkError::Configuration(format!("{name} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_public_endpoints() {
        let config = SdkConfig::new("key", "secret");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.image_url.contains("{artist_id}"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let err = SdkConfig::new("", "secret").validate().unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
        let err = SdkConfig::new("key", " ").validate().unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = SdkConfig::new("key", "secret")
            .with_api_url("http://localhost:8080")
            .with_image_url("http://img/{artist_id}/{size}.png");
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.image_url, "http://img/{artist_id}/{size}.png");
    }
}
