use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::outbound::FileSecureStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker server, e.g. "http://localhost:8080"
    #[serde(default = "default_static_url")]
    pub static_url: String,
    /// WebSocket endpoint for push updates
    #[serde(default = "default_realtime_url")]
    pub realtime_url: String,
    /// Upper bound for every network call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// `host:port` pairs tried by the connectivity probe
    #[serde(default = "default_probe_hosts")]
    pub probe_hosts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

fn default_static_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_realtime_url() -> String {
    "ws://localhost:8080/socket".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_probe_hosts() -> Vec<String> {
    vec!["1.1.1.1:443".to_string(), "8.8.8.8:53".to_string()]
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            static_url: default_static_url(),
            realtime_url: default_realtime_url(),
            request_timeout_secs: default_request_timeout_secs(),
            probe_hosts: default_probe_hosts(),
            store_path: None,
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("desktop-tracker")
            .join("config.toml"))
    }

    /// Load config from the default file and `TRACKER_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path` (which may be missing), overridden by the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("TRACKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("probe_hosts"),
            )
            .build()
            .with_context(|| format!("Failed to read config at {}", path.display()))?;

        settings
            .try_deserialize::<Self>()
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => FileSecureStore::default_path(),
        }
    }
}
