//! Operator configuration, read from a TOML file in the platform config
//! directory. Every key is optional; a missing file means all defaults.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::PresentationOptions;

const CONFIG_FILE_NAME: &str = "config.toml";
/// Default location of the hymn collection, relative to the working directory.
pub const DEFAULT_CONTENT_PATH: &str = "ccc_hymns_full.json";
pub const DEFAULT_DISPLAY_PATH: &str = "/display";
/// Fixed name of the single reusable output window.
pub const DEFAULT_WINDOW_NAME: &str = "hymns_display";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate a home directory for configuration")]
    NoHome,
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {path} is invalid")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the hymn collection.
    pub content_path: PathBuf,
    /// Path prefix of Display locations.
    pub display_path: String,
    pub window_name: String,
    /// Command prefix used to open a Display in its own terminal window.
    pub launcher: Vec<String>,
    /// Override for the window registry directory.
    pub window_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Presentation options the Dock starts with.
    pub defaults: PresentationOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from(DEFAULT_CONTENT_PATH),
            display_path: DEFAULT_DISPLAY_PATH.to_string(),
            window_name: DEFAULT_WINDOW_NAME.to_string(),
            launcher: vec!["x-terminal-emulator".to_string(), "-e".to_string()],
            window_dir: None,
            log_filter: "info".to_string(),
            defaults: PresentationOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. When `required` is false a missing file yields the
    /// defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound && !required => {
                return Ok(Self::default())
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Per-user directories for config, logs, and the window registry.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
    pub window_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("org", "celestial", "hymn-presenter").ok_or(ConfigError::NoHome)?;
        let window_root = dirs
            .runtime_dir()
            .unwrap_or_else(|| dirs.cache_dir())
            .to_path_buf();
        Ok(Self {
            config_file: dirs.config_dir().join(CONFIG_FILE_NAME),
            log_dir: dirs.data_local_dir().join("logs"),
            window_dir: window_root.join("windows"),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::options::{Align, Theme};

    #[test]
    fn missing_optional_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window_name, "hymns_display");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("config.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "content_path = \"/srv/hymns.json\"\nlauncher = [\"alacritty\", \"-e\"]\n\n[defaults]\ntheme = \"projector\"\nalign = \"left\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path, true).unwrap();
        assert_eq!(config.content_path, PathBuf::from("/srv/hymns.json"));
        assert_eq!(config.launcher, vec!["alacritty", "-e"]);
        assert_eq!(config.defaults.theme, Theme::Projector);
        assert_eq!(config.defaults.align, Align::Left);
        assert_eq!(config.display_path, "/display");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "launcher = 5").unwrap();
        let err = AppConfig::load(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
