//! Command-line argument parsing.
//!
//! Arguments are parsed by hand. Environment variables with the `RETROFX_`
//! prefix override the config file and are in turn overridden by flags.

use std::env;
use std::path::PathBuf;

use color_eyre::eyre::{Result, bail, eyre};
use retrofx_config::{Config, MAX_FPS, MIN_FPS};
use retrofx_core::{AnimationSpeed, EffectKind};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
retrofx: procedural terminal effects

USAGE:
    retrofx [OPTIONS]

OPTIONS:
    --effect=NAME     Initial effect: matrix, plasma, fire or starfield
    --fps=N           Frame rate, 1-240 (default: 60)
    --speed=SPEED     Animation speed: slow, medium or fast
    --config=PATH     Read settings from PATH instead of the default location
    --help, -h        Show this help message
    --version, -V     Show version

KEYBINDINGS:
    1-4             Select matrix, plasma, fire, starfield
    n               Next effect
    s               Stop the running effect
    v               Cycle animation speed
    h               Toggle the status line
    q / Esc / Ctrl+C  Quit

ENVIRONMENT VARIABLES:
    RETROFX_EFFECT    Override the configured effect
    RETROFX_FPS       Override the configured frame rate
    RETROFX_LOG       Log filter, e.g. 'debug' (default: warn)";

/// Parsed command-line options. `None` fields leave the config untouched.
#[derive(Debug, Default, PartialEq)]
pub struct Opts {
    pub effect: Option<EffectKind>,
    pub fps: Option<u32>,
    pub speed: Option<AnimationSpeed>,
    /// Alternate config file.
    pub config: Option<PathBuf>,
    pub show_help: bool,
    pub show_version: bool,
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Self> {
        Self::parse_from(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Parse `args` (without the program name), reading environment
    /// variables through `lookup`.
    pub fn parse_from<I, F>(args: I, lookup: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = lookup("RETROFX_EFFECT") {
            opts.effect = Some(parse_effect(&val)?);
        }
        if let Some(val) = lookup("RETROFX_FPS") {
            opts.fps = Some(parse_fps(&val)?);
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => opts.show_help = true,
                "--version" | "-V" => opts.show_version = true,
                other => {
                    if let Some(val) = other.strip_prefix("--effect=") {
                        opts.effect = Some(parse_effect(val)?);
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = Some(parse_fps(val)?);
                    } else if let Some(val) = other.strip_prefix("--speed=") {
                        opts.speed = Some(parse_speed(val)?);
                    } else if let Some(val) = other.strip_prefix("--config=") {
                        opts.config = Some(PathBuf::from(val));
                    } else {
                        bail!("unknown argument: {other}\nRun with --help for usage information.");
                    }
                }
            }
        }

        Ok(opts)
    }

    /// Overlay the parsed options onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(effect) = self.effect {
            config.effect = effect;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
    }
}

fn parse_effect(val: &str) -> Result<EffectKind> {
    val.parse().map_err(|err| eyre!("invalid effect: {err}"))
}

fn parse_fps(val: &str) -> Result<u32> {
    match val.trim().parse::<u32>() {
        Ok(n) if (MIN_FPS..=MAX_FPS).contains(&n) => Ok(n),
        _ => bail!("invalid fps value: {val} (expected {MIN_FPS}-{MAX_FPS})"),
    }
}

fn parse_speed(val: &str) -> Result<AnimationSpeed> {
    match val.trim().to_ascii_lowercase().as_str() {
        "slow" => Ok(AnimationSpeed::Slow),
        "medium" => Ok(AnimationSpeed::Medium),
        "fast" => Ok(AnimationSpeed::Fast),
        _ => bail!("invalid speed: {val} (expected slow, medium or fast)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_no_args() {
        let opts = Opts::parse_from(args(&[]), no_env).unwrap();
        assert_eq!(opts, Opts::default());
    }

    #[test]
    fn test_flags() {
        let opts = Opts::parse_from(
            args(&["--effect=Fire", "--fps=30", "--speed=fast", "--config=/tmp/x.toml"]),
            no_env,
        )
        .unwrap();
        assert_eq!(opts.effect, Some(EffectKind::Fire));
        assert_eq!(opts.fps, Some(30));
        assert_eq!(opts.speed, Some(AnimationSpeed::Fast));
        assert_eq!(opts.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn test_flags_override_env() {
        let env = |key: &str| match key {
            "RETROFX_EFFECT" => Some("plasma".to_string()),
            "RETROFX_FPS" => Some("24".to_string()),
            _ => None,
        };
        let opts = Opts::parse_from(args(&["--effect=starfield"]), env).unwrap();
        assert_eq!(opts.effect, Some(EffectKind::Starfield));
        assert_eq!(opts.fps, Some(24));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(Opts::parse_from(args(&["--effect=lava"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--fps=0"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--fps=abc"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--speed=warp"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--bogus"]), no_env).is_err());
    }

    #[test]
    fn test_help_and_version() {
        let opts = Opts::parse_from(args(&["-h", "-V"]), no_env).unwrap();
        assert!(opts.show_help);
        assert!(opts.show_version);
        assert!(!VERSION.is_empty());
        assert!(HELP_TEXT.contains("--effect"));
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = Config::default();
        let opts = Opts {
            effect: Some(EffectKind::Fire),
            fps: Some(30),
            ..Default::default()
        };
        opts.apply(&mut config);
        assert_eq!(config.effect, EffectKind::Fire);
        assert_eq!(config.fps, 30);
        assert_eq!(config.speed, AnimationSpeed::Medium);
    }
}
