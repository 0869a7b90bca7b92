use anyhow::{bail, Context};
use log::{info, warn};

use crate::data::{Config, Program, MAX_FPS, MAX_SCALE_FACTOR, WORLD_HEIGHT, WORLD_WIDTH};

pub const USAGE: &str = "\
Usage: mousesnake [OPTIONS]

A chain of circles that follows the mouse cursor.

Options:
    --scale N     Window pixels per canvas pixel (1 to 4, default 1)
    --fps N       Frames per second (1 to 240, default 60)
    --quiet       Only log warnings and errors
    --no-cursor   Do not draw the cursor marker
    --minifb      Use the minifb window backend
    --help        Print this message

Keys:
    Space         Grow the snake by one segment
    Escape        Quit
";

pub fn print_usage() {
    print!("{USAGE}");
}

impl Config {
    /// Reads command line flags. The first item is the program name
    /// and is skipped.
    pub fn eval_args(mut self, args: &mut dyn Iterator<Item = &String>) -> anyhow::Result<Self> {
        let mut args = args.skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scale" => {
                    let value = args
                        .next()
                        .context("Argument error: Expected value for --scale")?;

                    self.scale = value
                        .parse::<u8>()
                        .with_context(|| format!("Argument error: Invalid scale {value:?}"))?;

                    if !(1..=MAX_SCALE_FACTOR).contains(&self.scale) {
                        bail!("Argument error: scale must be between 1 and {MAX_SCALE_FACTOR}");
                    }
                }

                "--fps" => {
                    let value = args
                        .next()
                        .context("Argument error: Expected value for --fps")?;

                    self.fps = value
                        .parse::<u32>()
                        .with_context(|| format!("Argument error: Invalid frame rate {value:?}"))?;

                    if !(1..=MAX_FPS).contains(&self.fps) {
                        bail!("Argument error: fps must be between 1 and {MAX_FPS}");
                    }
                }

                "--quiet" => self.quiet = true,

                "--no-cursor" => self.cursor_marker = false,

                "--help" | "-h" => self.help = true,

                #[cfg(feature = "minifb")]
                "--minifb" => self.mode = crate::modes::Mode::WinLegacy,

                #[cfg(not(feature = "minifb"))]
                "--minifb" => bail!(
                    "Feature minifb is turned off in this build of mousesnake. \
                    Recompile with `--features minifb` to use this flag."
                ),

                other => bail!("Argument error: Unknown option {other}"),
            }
        }

        Ok(self)
    }
}

impl Program {
    pub fn print_startup_info(&self) {
        let config = self.config();

        info!("Starting mousesnake");
        info!("Running with: {}", self.mode().get_name());
        info!(
            "Canvas: {}x{}, window scale: {}",
            WORLD_WIDTH, WORLD_HEIGHT, config.scale
        );
        info!("Frame rate: {}fps", config.fps);

        if !config.cursor_marker {
            info!("Cursor marker is off");
        }

        if config.scale as usize * WORLD_WIDTH > 2400 {
            warn!("mousesnake draws on the CPU, large windows may be slow");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::Mode;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let args: Vec<String> = std::iter::once("mousesnake")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();

        Config::default().eval_args(&mut args.iter())
    }

    #[test]
    fn no_flags_gives_defaults() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_flag() {
        let config = parse(&["--scale", "2", "--fps", "144", "--quiet", "--no-cursor"]).unwrap();

        assert_eq!(config.scale, 2);
        assert_eq!(config.fps, 144);
        assert!(config.quiet);
        assert!(!config.cursor_marker);
        assert_eq!(config.mode, Mode::Win);
        assert!(!config.help);

        assert!(parse(&["--help"]).unwrap().help);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--scale"]).is_err());
        assert!(parse(&["--scale", "0"]).is_err());
        assert!(parse(&["--scale", "5"]).is_err());
        assert!(parse(&["--scale", "two"]).is_err());
        assert!(parse(&["--fps", "0"]).is_err());
        assert!(parse(&["--fps", "241"]).is_err());
        assert!(parse(&["--fps", "-3"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = parse(&["--size", "10x10"]).unwrap_err();
        assert!(err.to_string().contains("--size"));
    }

    #[cfg(not(feature = "minifb"))]
    #[test]
    fn minifb_flag_needs_the_feature() {
        assert!(parse(&["--minifb"]).is_err());
    }

    #[cfg(feature = "minifb")]
    #[test]
    fn minifb_flag_selects_legacy_window() {
        assert_eq!(parse(&["--minifb"]).unwrap().mode, Mode::WinLegacy);
    }
}
