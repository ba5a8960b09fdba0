//! Command-line configuration and log setup.

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing::Level;

use crate::{
    session::{Difficulty, Settings},
    visibility::{INITIAL_VIEW_RADIUS, MAX_VIEW_RADIUS, MIN_VIEW_RADIUS},
};

/// Explore randomly generated mazes through a fog of war.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Difficulty tier to start on.
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    pub difficulty: Difficulty,
    /// Seed for maze generation, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Initial view radius.
    #[arg(
        long,
        default_value_t = INITIAL_VIEW_RADIUS,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_VIEW_RADIUS)..=i64::from(MAX_VIEW_RADIUS))
    )]
    pub radius: u32,
    /// Start with the fog of war disabled.
    #[arg(long)]
    pub no_fog: bool,
    /// Write logs to this file; nothing is logged otherwise.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to the log file.
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Cli {
    /// Returns the session settings selected on the command line.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        Settings {
            difficulty: self.difficulty,
            view_radius: self.radius,
            fog: !self.no_fog,
            seed: self.seed,
        }
    }

    /// Installs the log subscriber when a log file was requested.
    ///
    /// The terminal belongs to the interface, so logs only ever go to a file.
    ///
    /// # Errors
    ///
    /// This function returns an error if the log file cannot be created or a global subscriber is
    /// already installed.
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(self.log_level)
            .try_init()
            .map_err(|err| eyre!("failed to install log subscriber: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["mistmaze"]).expect("defaults should parse");

        assert_eq!(cli.difficulty, Difficulty::Normal);
        assert_eq!(cli.radius, INITIAL_VIEW_RADIUS);
        assert!(!cli.no_fog);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(cli.settings(), Settings::default());
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "mistmaze",
            "--difficulty",
            "hard",
            "--seed",
            "17",
            "--radius",
            "6",
            "--no-fog",
            "--log-level",
            "debug",
        ])
        .expect("flags should parse");

        assert_eq!(
            cli.settings(),
            Settings {
                difficulty: Difficulty::Hard,
                view_radius: 6,
                fog: false,
                seed: Some(17),
            }
        );
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn test_cli_rejects_radius_out_of_range() {
        assert!(Cli::try_parse_from(["mistmaze", "--radius", "0"]).is_err());
        assert!(Cli::try_parse_from(["mistmaze", "--radius", "11"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["mistmaze", "--difficulty", "nightmare"]).is_err());
    }

    #[test]
    fn test_init_logging_without_file_is_noop() {
        let cli = Cli::try_parse_from(["mistmaze"]).expect("defaults should parse");

        assert!(cli.init_logging().is_ok());
    }
}
