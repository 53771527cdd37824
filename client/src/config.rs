//! Configuration management for the client.

use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Pictrail backend
    pub server_url: String,
    /// Directory for the persisted library snapshot and the media cache
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables, reading a `.env` file first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let server_url =
            env::var("PICTRAIL_SERVER_URL").map_err(|_| ConfigError::MissingServerUrl)?;

        let data_dir = env::var("PICTRAIL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pictrail-data"));

        Ok(Self {
            server_url,
            data_dir,
        })
    }

    /// Path of the persisted library snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("library.json")
    }

    /// Directory for materialized media files.
    pub fn media_dir(&self) -> PathBuf {
        self.data_dir.join("media")
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PICTRAIL_SERVER_URL environment variable is required")]
    MissingServerUrl,
}
