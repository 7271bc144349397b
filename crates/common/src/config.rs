// Configuration for the tray application
//
// Loaded from ~/.config/nordvpn-tray/config.toml when present; every
// field has a default so the file is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// NordVPN CLI binary to invoke
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Poll delay floor in seconds
    #[serde(default = "default_poll_initial")]
    pub poll_initial_secs: u64,

    /// Poll delay ceiling in seconds
    #[serde(default = "default_poll_max")]
    pub poll_max_secs: u64,

    /// Show a desktop notification when the tray icon is clicked
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_binary() -> String {
    "nordvpn".to_string()
}

fn default_poll_initial() -> u64 {
    1
}

fn default_poll_max() -> u64 {
    30
}

fn default_notifications() -> bool {
    true
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            poll_initial_secs: default_poll_initial(),
            poll_max_secs: default_poll_max(),
            notifications: default_notifications(),
        }
    }
}

impl TrayConfig {
    /// Load from the default config path, falling back to defaults if the
    /// file does not exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path (the `--config` override)
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: TrayConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nordvpn-tray").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(Error::Config("binary must not be empty".to_string()));
        }
        if self.poll_initial_secs == 0 {
            return Err(Error::Config(
                "poll_initial_secs must be at least 1".to_string(),
            ));
        }
        if self.poll_max_secs < self.poll_initial_secs {
            return Err(Error::Config(format!(
                "poll_max_secs ({}) must not be below poll_initial_secs ({})",
                self.poll_max_secs, self.poll_initial_secs
            )));
        }
        Ok(())
    }

    pub fn poll_initial(&self) -> Duration {
        Duration::from_secs(self.poll_initial_secs)
    }

    pub fn poll_max(&self) -> Duration {
        Duration::from_secs(self.poll_max_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrayConfig::default();
        assert_eq!(config.binary, "nordvpn");
        assert_eq!(config.poll_initial_secs, 1);
        assert_eq!(config.poll_max_secs, 30);
        assert!(config.notifications);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: TrayConfig = toml::from_str("").unwrap();
        assert_eq!(config.binary, "nordvpn");
        assert_eq!(config.poll_max_secs, 30);
    }

    #[test]
    fn test_partial_document_keeps_remaining_defaults() {
        let config: TrayConfig = toml::from_str("binary = \"/usr/local/bin/nordvpn\"").unwrap();
        assert_eq!(config.binary, "/usr/local/bin/nordvpn");
        assert_eq!(config.poll_initial_secs, 1);
        assert!(config.notifications);
    }

    #[test]
    fn test_validate_zero_initial_rejected() {
        let config = TrayConfig {
            poll_initial_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_below_initial_rejected() {
        let config = TrayConfig {
            poll_initial_secs: 10,
            poll_max_secs: 5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("poll_max_secs"));
    }

    #[test]
    fn test_validate_empty_binary_rejected() {
        let config = TrayConfig {
            binary: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
