//! TOML configuration.
//!
//! Looked up at `$EVENTDESK_CONFIG`, else `~/.config/eventdesk/config.toml`.
//! Every key is optional; a missing file gives the defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EVENTDESK_CONFIG";

const DEFAULT_URL: &str = "http://localhost:8080";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// On-disk shape; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    api_url: Option<String>,
    storage_url: Option<String>,
    token_path: Option<PathBuf>,
    media_root: Option<PathBuf>,
    log_path: Option<PathBuf>,
    stay_on_failure: Option<bool>,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the event API.
    pub api_url: String,
    /// Base URL of the object storage service.
    pub storage_url: String,
    /// File holding the bearer token of the signed-in user.
    pub token_path: PathBuf,
    /// Banner images must live under this directory, when set.
    pub media_root: Option<PathBuf>,
    /// Where diagnostics are written while the terminal is in raw mode.
    pub log_path: PathBuf,
    /// Keep the user on the form after a rejected or failed submission.
    pub stay_on_failure: bool,
}

impl Config {
    /// Loads the config from the environment override or the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("eventdesk")
                .join("config.toml"),
        };
        Self::from_path(&path)
    }

    /// Loads the config at `path`; relative defaults sit next to it.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => RawConfig::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::resolve(raw, dir))
    }

    fn resolve(raw: RawConfig, dir: &Path) -> Self {
        Self {
            api_url: raw.api_url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            storage_url: raw.storage_url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            token_path: raw.token_path.unwrap_or_else(|| dir.join("token")),
            media_root: raw.media_root,
            log_path: raw.log_path.unwrap_or_else(|| dir.join("eventdesk.log")),
            stay_on_failure: raw.stay_on_failure.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults_beside_it() {
        let dir = tempdir().unwrap();
        let config = Config::from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.storage_url, "http://localhost:8080");
        assert_eq!(config.token_path, dir.path().join("token"));
        assert_eq!(config.log_path, dir.path().join("eventdesk.log"));
        assert_eq!(config.media_root, None);
        assert!(!config.stay_on_failure);
    }

    #[test]
    fn reads_all_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
api_url = "https://api.example.com"
storage_url = "https://files.example.com"
token_path = "/run/eventdesk/token"
media_root = "/home/me/Pictures"
log_path = "/tmp/eventdesk.log"
stay_on_failure = true
"#,
        )
        .unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(
            config,
            Config {
                api_url: "https://api.example.com".into(),
                storage_url: "https://files.example.com".into(),
                token_path: "/run/eventdesk/token".into(),
                media_root: Some("/home/me/Pictures".into()),
                log_path: "/tmp/eventdesk.log".into(),
                stay_on_failure: true,
            }
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"https://api.example.com\"\n").unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.token_path, dir.path().join("token"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_uri = \"typo\"\n").unwrap();
        assert!(matches!(
            Config::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unreadable_path_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::from_path(dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }
}
