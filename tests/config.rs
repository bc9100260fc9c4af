use std::{collections::HashMap, path::PathBuf};

use mymedia::config::{ClientConfig, ConfigError, DEFAULT_PLAYER, TokenStoreKind};

fn config(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ClientConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_without_environment() {
    let config = config(&[]).unwrap();
    assert_eq!(config.server_url.as_str(), "http://localhost:8000/");
    assert_eq!(config.player, DEFAULT_PLAYER);
    assert_eq!(config.token_store, TokenStoreKind::File);
}

#[test]
fn environment_overrides_defaults() {
    let config = config(&[
        ("MYMEDIA_SERVER_URL", "https://media.example.org/base/"),
        ("MYMEDIA_DATA", "/tmp/mymedia-data"),
        ("MYMEDIA_DOWNLOAD_DIR", "/tmp/mymedia-downloads"),
        ("MYMEDIA_PLAYER", "vlc --play-and-exit"),
        ("MYMEDIA_TOKEN_STORE", "keyring"),
    ])
    .unwrap();

    assert_eq!(config.server_url.as_str(), "https://media.example.org/base/");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/mymedia-data"));
    assert_eq!(config.download_dir, PathBuf::from("/tmp/mymedia-downloads"));
    assert_eq!(config.player, "vlc --play-and-exit");
    assert_eq!(config.token_store, TokenStoreKind::Keyring);
}

#[test]
fn blank_values_fall_back() {
    let config = config(&[("MYMEDIA_SERVER_URL", "  "), ("MYMEDIA_PLAYER", "")]).unwrap();
    assert_eq!(config.server_url.as_str(), "http://localhost:8000/");
    assert_eq!(config.player, DEFAULT_PLAYER);
}

#[test]
fn invalid_values_are_errors() {
    assert!(matches!(
        config(&[("MYMEDIA_SERVER_URL", "not a url")]),
        Err(ConfigError::InvalidServerUrl(_))
    ));
    assert!(matches!(
        config(&[("MYMEDIA_SERVER_URL", "mailto:me@example.org")]),
        Err(ConfigError::InvalidServerUrl(_))
    ));
    assert_eq!(
        config(&[("MYMEDIA_TOKEN_STORE", "cloud")]).unwrap_err(),
        ConfigError::UnknownTokenStore("cloud".into())
    );
}
