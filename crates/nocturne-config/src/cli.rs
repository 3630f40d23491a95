//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use nocturne_core::AnimationSpeed;

use crate::Config;

/// nocturne command-line arguments.
///
/// CLI values override settings loaded from `config.toml`.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "nocturne", version, about = "An animated night sky for your terminal")]
pub struct CliArgs {
    /// Path to the config file (overrides the default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Number of nebula clouds.
    #[arg(long)]
    pub nebulas: Option<usize>,

    /// Number of meteor streaks.
    #[arg(long)]
    pub meteors: Option<usize>,

    /// Animation speed (slow, medium, fast).
    #[arg(long)]
    pub speed: Option<AnimationSpeed>,

    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Log filter (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the effective config to the config path and exit.
    #[arg(long)]
    pub init_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(stars) = args.stars {
            self.sky.star_count = stars;
        }
        if let Some(nebulas) = args.nebulas {
            self.sky.nebula_count = nebulas;
        }
        if let Some(meteors) = args.meteors {
            self.sky.meteor_count = meteors;
        }
        if let Some(speed) = args.speed {
            self.sky.speed = speed;
        }
        if let Some(fps) = args.fps {
            self.display.frame_rate = fps;
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
        if let Some(ref file) = args.log_file {
            self.log.file = Some(file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            stars: Some(200),
            speed: Some(AnimationSpeed::Slow),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sky.star_count, 200);
        assert_eq!(config.sky.speed, AnimationSpeed::Slow);
        assert_eq!(config.log.level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.sky.nebula_count, 3);
        assert_eq!(config.display.frame_rate, 60);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "nocturne",
            "--stars",
            "900",
            "--speed",
            "fast",
            "--fps",
            "30",
            "--init-config",
        ])
        .unwrap();
        assert_eq!(args.stars, Some(900));
        assert_eq!(args.speed, Some(AnimationSpeed::Fast));
        assert_eq!(args.fps, Some(30));
        assert!(args.init_config);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_parse_rejects_unknown_speed() {
        assert!(CliArgs::try_parse_from(["nocturne", "--speed", "ludicrous"]).is_err());
    }
}
