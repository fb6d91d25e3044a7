//! # POS Bridge Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     ORION_POS_API_URL=https://pos.example.np/api                        │
//! │     ORION_POS_API_KEY=...                                               │
//! │     ORION_POS_POLL_SECS=120                                             │
//! │     ORION_DATA_DIR=/var/lib/orion                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/orion-nexus/pos.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:3001/api, poll every 5 minutes                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3001/api"
//! api_key = "your-pos-api-key"
//! wholesaler_id = "3"
//! connect_timeout_secs = 5
//! request_timeout_secs = 15
//!
//! [schedule]
//! poll_interval_secs = 300
//! initial_backoff_ms = 1000
//! max_backoff_secs = 1800
//! jitter = 0.2
//!
//! [storage]
//! data_dir = "/var/lib/orion"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{PosError, PosResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the POS lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as both `Authorization: Bearer` and `X-API-Key`.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Overrides the signed-in user's id for POS requests.
    #[serde(default)]
    pub wholesaler_id: Option<String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_api_key() -> String {
    "your-pos-api-key".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    15
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            api_key: default_api_key(),
            wholesaler_id: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Schedule Settings
// =============================================================================

/// Polling cadence and failure backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// First delay after a failed tick.
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,

    /// Randomization factor in `[0, 1)`.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

/// Longest accepted poll interval or backoff cap: one week.
pub const MAX_SCHEDULE_SECS: u64 = 7 * 24 * 60 * 60;

fn default_poll_interval() -> u64 {
    300
}

fn default_initial_backoff() -> u64 {
    1000
}

fn default_max_backoff() -> u64 {
    1800
}

fn default_jitter() -> f64 {
    0.2
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            poll_interval_secs: default_poll_interval(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_secs: default_max_backoff(),
            jitter: default_jitter(),
        }
    }
}

impl ScheduleSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Key-value slot directory. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Main POS Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub schedule: ScheduleSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl PosConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pos.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> PosResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading POS config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load POS config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> PosResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| PosError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "POS config saved");
        Ok(())
    }

    pub fn validate(&self) -> PosResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PosError::InvalidUrl(format!(
                "POS URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.api_key.trim().is_empty() {
            return Err(PosError::InvalidConfig("api_key must not be empty".into()));
        }

        if self.schedule.poll_interval_secs == 0 {
            return Err(PosError::InvalidConfig(
                "poll_interval_secs must be greater than 0".into(),
            ));
        }

        if self.schedule.poll_interval_secs > MAX_SCHEDULE_SECS
            || self.schedule.max_backoff_secs > MAX_SCHEDULE_SECS
        {
            return Err(PosError::InvalidConfig(format!(
                "poll_interval_secs and max_backoff_secs must be at most {MAX_SCHEDULE_SECS}"
            )));
        }

        if self.api.request_timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            return Err(PosError::InvalidConfig(
                "timeouts must be greater than 0".into(),
            ));
        }

        if !(0.0..1.0).contains(&self.schedule.jitter) {
            return Err(PosError::InvalidConfig(format!(
                "jitter must be in [0, 1), got {}",
                self.schedule.jitter
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ORION_POS_API_URL") {
            debug!(url = %url, "Overriding POS URL from environment");
            self.api.base_url = url;
        }

        if let Some(key) = var("ORION_POS_API_KEY") {
            self.api.api_key = key;
        }

        if let Some(secs) = var("ORION_POS_POLL_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.schedule.poll_interval_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric ORION_POS_POLL_SECS"),
            }
        }

        if let Some(dir) = var("ORION_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("np", "orion", "orion-nexus")
            .map(|dirs| dirs.config_dir().join("pos.toml"))
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PosConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3001/api");
        assert_eq!(config.schedule.poll_interval(), Duration::from_secs(300));
        assert!(config.api.wholesaler_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PosConfig::default();

        config.api.base_url = "ftp://pos.local".into();
        assert!(matches!(config.validate(), Err(PosError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(PosError::InvalidUrl(_))));

        config.api.base_url = "https://pos.local/api".into();
        config.api.api_key = "  ".into();
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));

        config.api.api_key = "k".into();
        config.schedule.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        config.schedule.poll_interval_secs = u64::MAX;
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));

        config.schedule.poll_interval_secs = 60;
        config.schedule.max_backoff_secs = MAX_SCHEDULE_SECS + 1;
        assert!(matches!(config.validate(), Err(PosError::InvalidConfig(_))));

        config.schedule.max_backoff_secs = MAX_SCHEDULE_SECS;
        config.schedule.jitter = 1.5;
        assert!(config.validate().is_err());

        config.schedule.jitter = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ORION_POS_API_URL", "https://pos.example.np/api"),
            ("ORION_POS_API_KEY", "secret"),
            ("ORION_POS_POLL_SECS", "120"),
            ("ORION_DATA_DIR", "/tmp/orion"),
        ]
        .into_iter()
        .collect();

        let mut config = PosConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://pos.example.np/api");
        assert_eq!(config.api.api_key, "secret");
        assert_eq!(config.schedule.poll_interval_secs, 120);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/orion")));
    }

    #[test]
    fn test_bad_poll_override_is_ignored() {
        let mut config = PosConfig::default();
        config.apply_overrides(|k| (k == "ORION_POS_POLL_SECS").then(|| "soon".to_string()));
        assert_eq!(config.schedule.poll_interval_secs, 300);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PosConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://10.0.0.5:3001/api/"
            wholesaler_id = "3"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "http://10.0.0.5:3001/api");
        assert_eq!(config.api.wholesaler_id.as_deref(), Some("3"));
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.schedule.max_backoff_secs, 1800);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pos.toml");

        let mut config = PosConfig::default();
        config.api.api_key = "from-file".into();
        config.schedule.poll_interval_secs = 90;
        config.save(Some(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("[schedule]"));

        let loaded: PosConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded.api.api_key, "from-file");
        assert_eq!(loaded.schedule.poll_interval_secs, 90);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pos.toml");
        std::fs::write(&path, "[api\nbase_url =").unwrap();

        let err = PosConfig::load(Some(path)).unwrap_err();
        assert!(err.is_config_error());
    }
}
