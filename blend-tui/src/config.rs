//! Configuration loading for the blend terminal client.
//!
//! All fields are required. No defaults.

use blend_core::MIN_RESIZE_WIDTH;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Longest a notification may stay on screen: one day.
pub const MAX_NOTIFICATION_TTL_MS: u64 = 86_400_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    /// Base URL of the blending server (price, chart and `/run_lp`).
    pub api_base_url: String,
    /// File backing the key-value store that holds form snapshots.
    pub snapshot_path: PathBuf,
    /// Key under which the form snapshot is stored.
    pub snapshot_key: String,
    pub error_log_path: PathBuf,
    pub clock_interval_ms: u64,
    pub price_refresh_interval_ms: u64,
    pub notification_ttl_ms: u64,
    /// Initial width of resizable fields, in logical units.
    pub default_field_width: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or BLEND_TUI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "snapshot_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.snapshot_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "snapshot_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.error_log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "error_log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.clock_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "clock_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.price_refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "price_refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.notification_ttl_ms == 0 || self.notification_ttl_ms > MAX_NOTIFICATION_TTL_MS {
            return Err(ConfigError::InvalidValue {
                field: "notification_ttl_ms",
                reason: format!("must be in 1..={}", MAX_NOTIFICATION_TTL_MS),
            });
        }
        if !self.default_field_width.is_finite() || self.default_field_width < MIN_RESIZE_WIDTH {
            return Err(ConfigError::InvalidValue {
                field: "default_field_width",
                reason: format!("must be >= {}", MIN_RESIZE_WIDTH),
            });
        }
        Ok(())
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        let ms = self.notification_ttl_ms.min(MAX_NOTIFICATION_TTL_MS);
        chrono::Duration::milliseconds(i64::try_from(ms).unwrap_or(0))
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("BLEND_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
api_base_url = "http://localhost:5000"
snapshot_path = "tmp/blend-snapshots.json"
snapshot_key = "blendFormData"
error_log_path = "tmp/blend-tui.log"
clock_interval_ms = 1000
price_refresh_interval_ms = 60000
notification_ttl_ms = 3000
default_field_width = 80.0
"#;

    #[test]
    fn test_parses_sample() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.snapshot_key, "blendFormData");
        assert_eq!(config.notification_ttl(), chrono::Duration::seconds(3));
    }

    #[test]
    fn test_oversized_notification_ttl_rejected() {
        let huge = SAMPLE.replace("notification_ttl_ms = 3000", "notification_ttl_ms = 18446744073709551615");
        let config = TuiConfig::from_toml(&huge).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "notification_ttl_ms", .. })
        ));
        assert_eq!(
            config.notification_ttl(),
            chrono::Duration::milliseconds(MAX_NOTIFICATION_TTL_MS as i64)
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let extra = format!("{}\ntheme = \"dark\"\n", SAMPLE);
        assert!(matches!(TuiConfig::from_toml(&extra), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_field_rejected() {
        let missing = SAMPLE.replace("snapshot_key = \"blendFormData\"\n", "");
        assert!(TuiConfig::from_toml(&missing).is_err());
    }
}
