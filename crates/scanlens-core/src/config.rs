//! Configuration loading
//!
//! Defaults cover the common case; an optional TOML file at
//! `~/.config/scanlens/config.toml` overrides them, and CLI flags
//! override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraConstraints, Facing};
use crate::decode::Inversion;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_IDEAL_WIDTH: u32 = 640;
pub const DEFAULT_IDEAL_HEIGHT: u32 = 640;

/// User-tunable scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Sampling cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// Preferred stream width.
    pub ideal_width: u32,
    /// Preferred stream height.
    pub ideal_height: u32,
    /// Preferred camera facing.
    pub facing: Facing,
    /// Explicit camera index; overrides the facing hint.
    pub device: Option<u32>,
    /// Luma polarity the decoder attempts.
    pub inversion: Inversion,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            ideal_width: DEFAULT_IDEAL_WIDTH,
            ideal_height: DEFAULT_IDEAL_HEIGHT,
            facing: Facing::Rear,
            device: None,
            inversion: Inversion::Both,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ScanConfig {
    /// Load from the default location, falling back to defaults when no
    /// config file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn constraints(&self) -> CameraConstraints {
        CameraConstraints {
            facing: self.facing,
            ideal_width: self.ideal_width,
            ideal_height: self.ideal_height,
            device: self.device,
        }
    }
}

/// `~/.config/scanlens/config.toml` (platform equivalent).
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scanlens").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.ideal_width, 640);
        assert_eq!(config.ideal_height, 640);
        assert_eq!(config.facing, Facing::Rear);
        assert_eq!(config.device, None);
        assert_eq!(config.inversion, Inversion::Both);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_ms = 250").unwrap();
        writeln!(file, "facing = \"front\"").unwrap();

        let config = ScanConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.facing, Facing::Front);
        // Unspecified keys fall back to defaults
        assert_eq!(config.ideal_width, DEFAULT_IDEAL_WIDTH);
        assert_eq!(config.inversion, Inversion::Both);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_ms = 50").unwrap();
        writeln!(file, "ideal_width = 1280").unwrap();
        writeln!(file, "ideal_height = 720").unwrap();
        writeln!(file, "facing = \"rear\"").unwrap();
        writeln!(file, "device = 2").unwrap();
        writeln!(file, "inversion = \"original\"").unwrap();

        let config = ScanConfig::load(file.path()).unwrap();
        assert_eq!(config.device, Some(2));
        assert_eq!(config.inversion, Inversion::Original);
        let constraints = config.constraints();
        assert_eq!(constraints.ideal_width, 1280);
        assert_eq!(constraints.device, Some(2));
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_interval_ms = \"not a number\"").unwrap();
        assert!(matches!(
            ScanConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(matches!(
            ScanConfig::load(Path::new("/nonexistent/scanlens.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
