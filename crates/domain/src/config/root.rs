use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::capture::CaptureConfig;
use super::display::DisplayConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "arpscope.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/arpscope/config.toml";

/// Main configuration structure for arpscope
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Live capture configuration (interface, targets, timeouts)
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Host cache expiry configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Terminal display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. arpscope.toml in current directory
    /// 3. /etc/arpscope/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interface) = overrides.interface {
            self.capture.interface = Some(interface);
        }
        if let Some(cidrs) = overrides.target_cidrs {
            self.capture.target_cidrs = cidrs;
        }
        if let Some(ms) = overrides.arp_timeout_ms {
            self.capture.arp_timeout_ms = ms;
        }
        if let Some(ms) = overrides.icmp_timeout_ms {
            self.capture.icmp_timeout_ms = ms;
        }
        if let Some(ttl) = overrides.icmp_max_ttl {
            self.capture.icmp_max_ttl = ttl;
        }
        if overrides.capture_icmp {
            self.capture.capture_icmp = true;
        }
        if let Some(ms) = overrides.ui_refresh_ms {
            self.display.ui_refresh_ms = ms;
        }
        if overrides.no_display {
            self.display.enabled = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capture.snaplen <= 0 {
            return Err(ConfigError::Validation(
                "capture.snaplen must be positive".to_string(),
            ));
        }

        if self.capture.read_timeout_ms <= 0 {
            return Err(ConfigError::Validation(
                "capture.read_timeout_ms must be positive".to_string(),
            ));
        }

        if self.capture.route_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "capture.route_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.capture.icmp_max_ttl == 0 {
            return Err(ConfigError::Validation(
                "capture.icmp_max_ttl cannot be 0".to_string(),
            ));
        }

        if matches!(self.capture.interface.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "capture.interface cannot be empty".to_string(),
            ));
        }

        if self.cache.host_ttl_secs == 0 || self.cache.expiry_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.host_ttl_secs and cache.expiry_interval_secs must be positive".to_string(),
            ));
        }

        if self.cache.max_events == Some(0) {
            return Err(ConfigError::Validation(
                "cache.max_events cannot be 0".to_string(),
            ));
        }

        if self.display.ui_refresh_ms == 0 {
            return Err(ConfigError::Validation(
                "display.ui_refresh_ms cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub interface: Option<String>,
    pub target_cidrs: Option<Vec<IpNetwork>>,
    pub arp_timeout_ms: Option<u64>,
    pub icmp_timeout_ms: Option<u64>,
    pub icmp_max_ttl: Option<u8>,
    pub capture_icmp: bool,
    pub ui_refresh_ms: Option<u64>,
    pub no_display: bool,
    pub log_level: Option<String>,
}
