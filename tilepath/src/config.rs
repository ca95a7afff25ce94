//! Command line options and the validated configuration built from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::runner::{DEFAULT_MARGIN, MIN_MARGIN};
use crate::tool::{
    clamp_ticks, clamp_weight, DEFAULT_TICKS_PER_SECOND, DEFAULT_WEIGHT, MAX_WEIGHT,
};

/// Largest margin the search may extend past the painted area.
pub const MAX_MARGIN: i32 = 1024;

pub const DEFAULT_FRAME_MS: u64 = 16;
const MAX_FRAME_MS: u64 = 1000;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tilepath",
    version,
    about = "Paint walls and weighted obstacles, then watch a path search step by step"
)]
pub struct Cli {
    /// Search expansions per second (1-1000)
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_SECOND)]
    pub ticks_per_second: u32,

    /// Initial obstacle weight (0-10)
    #[arg(long, default_value_t = DEFAULT_WEIGHT, allow_negative_numbers = true)]
    pub weight: f32,

    /// Cells the search may wander past the painted area
    #[arg(long, default_value_t = DEFAULT_MARGIN, allow_negative_numbers = true)]
    pub margin: i32,

    /// Longest wait for terminal input between frames, in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Leave the mouse to the terminal; only keys drive the demo
    #[arg(long)]
    pub no_mouse: bool,

    /// Screen width in cells (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<i32>,

    /// Screen height in cells (defaults to the terminal height)
    #[arg(long)]
    pub height: Option<i32>,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ticks_per_second: u32,
    pub weight: f32,
    pub margin: i32,
    pub frame_interval: Duration,
    pub mouse: bool,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            weight: DEFAULT_WEIGHT,
            margin: DEFAULT_MARGIN,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            mouse: true,
            width: None,
            height: None,
        }
    }
}

impl Config {
    /// Clamp every option into its valid range, logging each adjustment.
    pub fn from_cli(cli: &Cli) -> Self {
        let ticks_per_second = clamp_ticks(cli.ticks_per_second as i64);
        if ticks_per_second != cli.ticks_per_second {
            log::warn!(
                "ticks per second {} out of range, using {ticks_per_second}",
                cli.ticks_per_second
            );
        }

        let weight = clamp_weight(cli.weight);
        if (weight - cli.weight).abs() > 0.05 || cli.weight.is_nan() {
            log::warn!(
                "weight {} out of range 0-{MAX_WEIGHT}, using {weight}",
                cli.weight
            );
        }

        let margin = cli.margin.clamp(MIN_MARGIN, MAX_MARGIN);
        if margin != cli.margin {
            log::warn!("margin {} out of range, using {margin}", cli.margin);
        }

        let frame_ms = cli.frame_ms.clamp(1, MAX_FRAME_MS);
        if frame_ms != cli.frame_ms {
            log::warn!("frame interval {} ms out of range, using {frame_ms}", cli.frame_ms);
        }

        let positive = |name: &str, v: Option<i32>| match v {
            Some(n) if n < 1 => {
                log::warn!("{name} {n} ignored, using the terminal size");
                None
            }
            other => other,
        };

        let config = Self {
            ticks_per_second,
            weight,
            margin,
            frame_interval: Duration::from_millis(frame_ms),
            mouse: !cli.no_mouse,
            width: positive("width", cli.width),
            height: positive("height", cli.height),
        };
        log::debug!("{config:?}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tilepath").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(Config::from_cli(&cli), Config::default());
        assert!(cli.log_file.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cli = parse(&[
            "--ticks-per-second",
            "5000",
            "--weight",
            "-3",
            "--margin",
            "-1",
            "--width",
            "0",
            "--frame-ms",
            "0",
        ]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.ticks_per_second, 1000);
        assert_eq!(config.weight, 0.0);
        assert_eq!(config.margin, MIN_MARGIN);
        assert_eq!(config.frame_interval, Duration::from_millis(1));
        assert_eq!(config.width, None);
        assert!(config.mouse);

        let config = Config::from_cli(&parse(&["--margin", "0"]));
        assert_eq!(config.margin, 1);
    }

    #[test]
    fn explicit_values_pass_through() {
        let cli = parse(&[
            "--ticks-per-second",
            "5",
            "--weight",
            "2.5",
            "--width",
            "100",
            "--height",
            "40",
            "--log-file",
            "/tmp/tilepath.log",
            "-v",
            "--frame-ms",
            "33",
            "--no-mouse",
        ]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.ticks_per_second, 5);
        assert_eq!(config.weight, 2.5);
        assert_eq!(config.width, Some(100));
        assert_eq!(config.height, Some(40));
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert!(!config.mouse);
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/tilepath.log")));
    }
}
