//! Command-line configuration
//!
//! [`Cli`] is the raw clap surface; [`Cli::into_mode`] validates it into a
//! [`Mode`] the binary can act on.

use crate::session::{DEFAULT_DISKS, MAX_UI_DISKS};
use crate::solver::{self, PegId, SolverError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Per-phase duration: 300 ms transition plus 20 ms slack
pub const DEFAULT_PHASE_MS: u64 = 320;

pub const DEFAULT_IMPACT_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("disk count must be between 1 and {max}, got {got}")]
    DiskCountOutOfRange { got: u32, max: u32 },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

#[derive(Debug, Parser)]
#[command(name = "hanoitty", version, about = "Animated Towers of Hanoi in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Number of disks
    #[arg(long, short = 'n', default_value_t = DEFAULT_DISKS)]
    pub disks: u32,

    /// Duration of each lift/translate/settle phase in milliseconds
    #[arg(long, default_value_t = DEFAULT_PHASE_MS)]
    pub phase_ms: u64,

    /// Duration of the landing flash in milliseconds
    #[arg(long, default_value_t = DEFAULT_IMPACT_MS)]
    pub impact_ms: u64,

    /// Start playing immediately
    #[arg(long)]
    pub autostart: bool,

    /// Also write log events to this file
    #[arg(long, env = "HANOITTY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `hanoitty::driver=debug`
    #[arg(long, env = "HANOITTY_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the solution and exit
    Solve {
        #[arg(long, short = 'n', default_value_t = DEFAULT_DISKS)]
        disks: u32,
        #[arg(long, default_value_t = 1)]
        from: u8,
        #[arg(long, default_value_t = 3)]
        to: u8,
    },
}

/// Logging destination and filter
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

/// Settings for the interactive player
#[derive(Debug, Clone)]
pub struct PlayConfig {
    pub disks: u32,
    pub phase: Duration,
    pub impact: Duration,
    pub autostart: bool,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Play(PlayConfig),
    Solve { disks: u32, from: PegId, to: PegId },
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            filter: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }

    pub fn into_mode(self) -> Result<Mode, ConfigError> {
        match self.command {
            Some(Command::Solve { disks, from, to }) => {
                let from = PegId::new(from)?;
                let to = PegId::new(to)?;
                if disks < 1 || disks > solver::MAX_DISKS {
                    return Err(ConfigError::DiskCountOutOfRange {
                        got: disks,
                        max: solver::MAX_DISKS,
                    });
                }
                if from == to {
                    return Err(SolverError::SamePeg(from).into());
                }
                Ok(Mode::Solve { disks, from, to })
            }
            None => {
                if !(1..=MAX_UI_DISKS).contains(&self.disks) {
                    return Err(ConfigError::DiskCountOutOfRange {
                        got: self.disks,
                        max: MAX_UI_DISKS,
                    });
                }
                if self.phase_ms == 0 {
                    return Err(ConfigError::ZeroDuration("--phase-ms"));
                }
                if self.impact_ms == 0 {
                    return Err(ConfigError::ZeroDuration("--impact-ms"));
                }
                Ok(Mode::Play(PlayConfig {
                    disks: self.disks,
                    phase: Duration::from_millis(self.phase_ms),
                    impact: Duration::from_millis(self.impact_ms),
                    autostart: self.autostart,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Mode, ConfigError> {
        let cli = Cli::try_parse_from(args).expect("clap parse failed");
        cli.into_mode()
    }

    #[test]
    fn test_defaults() {
        match parse(&["hanoitty"]).unwrap() {
            Mode::Play(cfg) => {
                assert_eq!(cfg.disks, DEFAULT_DISKS);
                assert_eq!(cfg.phase, Duration::from_millis(DEFAULT_PHASE_MS));
                assert!(!cfg.autostart);
            }
            other => panic!("Expected play mode, got {:?}", other),
        }
    }

    #[test]
    fn test_disk_range() {
        assert!(matches!(
            parse(&["hanoitty", "--disks", "0"]),
            Err(ConfigError::DiskCountOutOfRange { got: 0, .. })
        ));
        assert!(matches!(
            parse(&["hanoitty", "-n", "14"]),
            Err(ConfigError::DiskCountOutOfRange { got: 14, max: 13 })
        ));
        assert!(parse(&["hanoitty", "-n", "13"]).is_ok());
    }

    #[test]
    fn test_zero_phase_rejected() {
        assert!(matches!(
            parse(&["hanoitty", "--phase-ms", "0"]),
            Err(ConfigError::ZeroDuration(_))
        ));
    }

    #[test]
    fn test_solve_subcommand() {
        match parse(&["hanoitty", "solve", "-n", "4", "--from", "2", "--to", "1"]).unwrap() {
            Mode::Solve { disks, from, to } => {
                assert_eq!(disks, 4);
                assert_eq!(from, PegId::B);
                assert_eq!(to, PegId::A);
            }
            other => panic!("Expected solve mode, got {:?}", other),
        }

        assert!(matches!(
            parse(&["hanoitty", "solve", "--from", "2", "--to", "2"]),
            Err(ConfigError::Solver(SolverError::SamePeg(_)))
        ));
        assert!(matches!(
            parse(&["hanoitty", "solve", "--to", "7"]),
            Err(ConfigError::Solver(SolverError::InvalidPeg(7)))
        ));
    }
}
