use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_PLAYER: &str = "mpv";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid server url: {0}")]
    InvalidServerUrl(String),

    #[error("Unknown token store '{0}', expected 'file' or 'keyring'")]
    UnknownTokenStore(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenStoreKind {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    pub data_dir: PathBuf,
    pub download_dir: PathBuf,
    pub player: String,
    pub token_store: TokenStoreKind,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_url = var("MYMEDIA_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url =
            Url::parse(&raw_url).map_err(|_| ConfigError::InvalidServerUrl(raw_url.clone()))?;
        if server_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidServerUrl(raw_url));
        }

        let token_store = match var("MYMEDIA_TOKEN_STORE").as_deref() {
            None | Some("file") => TokenStoreKind::File,
            Some("keyring") => TokenStoreKind::Keyring,
            Some(other) => return Err(ConfigError::UnknownTokenStore(other.to_string())),
        };

        Ok(Self {
            server_url,
            data_dir: var("MYMEDIA_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            download_dir: var("MYMEDIA_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_download_dir),
            player: var("MYMEDIA_PLAYER").unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            token_store,
        })
    }
}

pub fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "mymedia", env!("CARGO_PKG_NAME"))
}

pub fn default_data_dir() -> PathBuf {
    match project_directory() {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => PathBuf::from(".").join(".data"),
    }
}

fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
