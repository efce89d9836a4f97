//! # skillmatrix CLI Module
//!
//! ## Available Commands
//!
//! - `summary` - Snapshot statistics (default)
//! - `candidates` - Internal candidates for a position vs. external hiring
//! - `gaps` - Capability gaps of every process
//! - `gap` - Capability record of one process
//! - `reliance` - Worker reliance issues of every process
//! - `reliance-of` - Reliance record of one process
//! - `open-positions` - Positions with open slots
//! - `unmet` - Processes of a position that no incumbent can perform
//! - `server` - Start the HTTP server

mod commands;

use crate::config::{AppConfig, resolve_cost_per_level};
use clap::{Parser, Subcommand};
use skillmatrix_core::{Money, WorkforceError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// skillmatrix - workforce capability analysis
///
/// Matches employee skill profiles against positions and processes, ranks
/// candidates and proposes training paths.
#[derive(Parser, Debug)]
#[command(name = "skillmatrix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the workforce snapshot (JSON)
    #[arg(short = 'S', long, global = true, default_value = "workforce.json")]
    pub snapshot: PathBuf,

    /// Path to a TOML config file (default: ./skillmatrix.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Training cost per missing skill level, in major units
    #[arg(long, global = true)]
    pub cost_per_level: Option<f64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show snapshot statistics
    Summary,

    /// Rank internal candidates for a position
    Candidates {
        /// Position ID
        #[arg(short, long)]
        position: u32,
    },

    /// Capability gaps of every process
    Gaps,

    /// Capability record of one process
    Gap {
        /// Process ID
        #[arg(short, long)]
        process: u32,
    },

    /// Worker reliance issues of every process
    Reliance,

    /// Reliance record of one process
    RelianceOf {
        /// Process ID
        #[arg(short, long)]
        process: u32,
    },

    /// List positions with open slots
    OpenPositions {
        /// Only positions of this department
        #[arg(short, long)]
        department: Option<u32>,

        /// Minimum position level
        #[arg(long)]
        min_level: Option<u32>,

        /// Maximum position level
        #[arg(long)]
        max_level: Option<u32>,
    },

    /// Processes of a position that no active incumbent can perform
    Unmet {
        /// Position ID
        #[arg(short, long)]
        position: u32,
    },
}

/// Output options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json_mode: bool,
    pub verbose: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and loaded configuration.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<(), WorkforceError> {
    let cost = cost_per_level(cli.cost_per_level, &config)?;
    let out = Output {
        json_mode: cli.json_mode,
        verbose: cli.verbose,
    };
    let path = cli.snapshot.as_path();

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(major) = cli.cost_per_level {
                config.analysis.training_cost_per_level = major;
            }
            cmd_server(path, &config).await
        }
        Some(Commands::Summary) | None => cmd_summary(path, out),
        Some(Commands::Candidates { position }) => cmd_candidates(path, out, position, cost),
        Some(Commands::Gaps) => cmd_gaps(path, out, cost),
        Some(Commands::Gap { process }) => cmd_gap(path, out, process, cost),
        Some(Commands::Reliance) => cmd_reliance(path, out, cost),
        Some(Commands::RelianceOf { process }) => cmd_reliance_of(path, out, process, cost),
        Some(Commands::OpenPositions {
            department,
            min_level,
            max_level,
        }) => cmd_open_positions(path, out, department, min_level, max_level),
        Some(Commands::Unmet { position }) => cmd_unmet(path, out, position),
    }
}

/// `--cost-per-level` if given, else the configured value.
fn cost_per_level(flag: Option<f64>, config: &AppConfig) -> Result<Money, WorkforceError> {
    match flag {
        Some(major) => resolve_cost_per_level(major),
        None => config.cost_per_level(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["skillmatrix"]);
        assert_eq!(cli.snapshot, PathBuf::from("workforce.json"));
        assert!(cli.command.is_none());
        assert!(!cli.json_mode);
    }

    #[test]
    fn test_parse_candidates_with_global_flags() {
        let cli = Cli::parse_from([
            "skillmatrix",
            "candidates",
            "--position",
            "7",
            "-S",
            "org.json",
            "--cost-per-level",
            "120.5",
            "--json-mode",
        ]);
        assert!(matches!(cli.command, Some(Commands::Candidates { position: 7 })));
        assert_eq!(cli.snapshot, PathBuf::from("org.json"));
        assert_eq!(cli.cost_per_level, Some(120.5));
        assert!(cli.json_mode);
    }

    #[test]
    fn test_parse_reliance_of() {
        let cli = Cli::parse_from(["skillmatrix", "reliance-of", "-p", "3"]);
        assert!(matches!(cli.command, Some(Commands::RelianceOf { process: 3 })));
    }

    #[test]
    fn test_cost_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(
            cost_per_level(Some(10.0), &config).expect("valid"),
            Money::from_major(10)
        );
        assert_eq!(
            cost_per_level(None, &config).expect("valid"),
            config.cost_per_level().expect("valid")
        );
        assert!(cost_per_level(Some(-1.0), &config).is_err());
    }
}
