//! CLI configuration

use crate::error::{CliError, Result};
use pod_playback::StoreConfig;
use pod_player::ViewConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "podplay.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// JSON episode list; the built-in demo list is used when unset
    #[serde(default)]
    pub episodes: Option<PathBuf>,

    /// Queue the whole list from this episode on launch
    #[serde(default)]
    pub start_index: Option<usize>,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            episodes: None,
            start_index: None,
            log_filter: default_log_filter(),
            store: StoreConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl PlayerSettings {
    /// Load settings from an optional file and the environment
    ///
    /// Without an explicit path, `podplay.toml` in the working directory is
    /// used if present. Environment variables prefixed `PODPLAY_` override
    /// file values, with `__` separating nested keys
    /// (`PODPLAY_STORE__INDEX_POLICY=clamp`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PODPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

fn default_log_filter() -> String {
    "pod_cli=info,pod_player=info,pod_playback=info".to_string()
}
