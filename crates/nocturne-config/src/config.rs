//! Configuration structs with defaults and TOML persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use nocturne_core::{
    MAX_METEOR_COUNT, MAX_NEBULA_COUNT, MAX_PIXEL_RATIO, MAX_STAR_COUNT, PixelRatio, SkyOptions,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

const LOG_FILE: &str = "nocturne.log";

/// Largest accepted wash blur, in cells.
pub const MAX_WASH_BLUR: f32 = 100.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Population and animation settings.
    pub sky: SkyOptions,
    /// Terminal presentation settings.
    pub display: DisplayConfig,
    /// Log output settings.
    pub log: LogConfig,
}

/// Terminal presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Raster pixels per terminal cell.
    pub pixel_ratio: PixelRatio,
    /// Follow terminal resizes. When off the sky keeps its first size.
    pub observe_resize: bool,
    /// Blur of the ambient violet wash, in cells.
    pub wash_blur: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            pixel_ratio: PixelRatio::default(),
            observe_resize: true,
            wash_blur: 12.0,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `nocturne_sky=debug`.
    pub level: String,
    /// Log file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "nocturne")
}

impl Config {
    /// `<config_dir>/config.toml` for the current user.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Where logs go when `log.file` is unset.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE)))
    }

    /// Time budget of one frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.display.frame_rate.max(1)))
    }

    /// Load and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path`, or use defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.frame_rate == 0 {
            return Err(ConfigError::Invalid("display.frame_rate must be positive".into()));
        }
        if !self.display.pixel_ratio.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "display.pixel_ratio components must be between 1 and {MAX_PIXEL_RATIO}"
            )));
        }
        if !(0.0..=MAX_WASH_BLUR).contains(&self.display.wash_blur) {
            return Err(ConfigError::Invalid(format!(
                "display.wash_blur must be between 0 and {MAX_WASH_BLUR}"
            )));
        }
        if self.sky.star_count > MAX_STAR_COUNT {
            return Err(ConfigError::Invalid(format!(
                "sky.star_count must not exceed {MAX_STAR_COUNT}"
            )));
        }
        if self.sky.nebula_count > MAX_NEBULA_COUNT {
            return Err(ConfigError::Invalid(format!(
                "sky.nebula_count must not exceed {MAX_NEBULA_COUNT}"
            )));
        }
        if self.sky.meteor_count > MAX_METEOR_COUNT {
            return Err(ConfigError::Invalid(format!(
                "sky.meteor_count must not exceed {MAX_METEOR_COUNT}"
            )));
        }
        if !self.sky.color_band.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "sky.color_band hue_min ({}) must not exceed hue_max ({})",
                self.sky.color_band.hue_min, self.sky.color_band.hue_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nocturne_core::AnimationSpeed;

    #[test]
    fn test_default_config_serializes() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("star_count = 1500"));
        assert!(toml_str.contains("frame_rate = 60"));
        assert!(toml_str.contains("speed = \"medium\""));
        assert!(!toml_str.contains("file"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.sky.speed = AnimationSpeed::Fast;
        config.log.file = Some(PathBuf::from("/tmp/nocturne.log"));
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = toml::from_str("[sky]\nstar_count = 300\n").unwrap();
        assert_eq!(config.sky.star_count, 300);
        assert_eq!(config.sky.nebula_count, 3);
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = toml::from_str("future_setting = true\n[display]\nshiny = 1\n");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_toml_produces_error() {
        let result: Result<Config, _> = toml::from_str("[sky\nstar_count = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.display.frame_rate = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.display.pixel_ratio = PixelRatio::new(0, 2);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sky.color_band.hue_min = 300.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_rejects_oversized_values() {
        let mut config = Config::default();
        config.display.wash_blur = 1e20;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.display.wash_blur = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.display.wash_blur = MAX_WASH_BLUR;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.display.pixel_ratio = PixelRatio::new(u16::MAX, u16::MAX);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sky.star_count = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sky.star_count = MAX_STAR_COUNT;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.sky.nebula_count = MAX_NEBULA_COUNT + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sky.meteor_count = MAX_METEOR_COUNT + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.sky.star_count = 800;
        config.display.pixel_ratio = PixelRatio::new(2, 4);

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[display]\nframe_rate = 0\n").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_frame_interval() {
        let mut config = Config::default();
        config.display.frame_rate = 50;
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_explicit_log_path_wins() {
        let mut config = Config::default();
        config.log.file = Some(PathBuf::from("/var/log/sky.log"));
        assert_eq!(config.log_path(), Some(PathBuf::from("/var/log/sky.log")));
    }
}
