// namelink CLI - fuzzy name matching across text rosters

mod exit_codes;
mod export;
mod link;
mod loader;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{link_exit_code, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "namelink")]
#[command(about = "Match and reconcile person names across independently curated lists")]
#[command(version)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link the configured lists into clusters of matching names
    #[command(after_help = "\
Examples:
  namelink match rosters.toml
  namelink match rosters.toml --json
  namelink match rosters.toml --threshold 90 --min-coverage 3 --csv clusters.csv")]
    Match {
        /// Path to the run config (.toml)
        config: PathBuf,

        /// Override the similarity threshold (1-100)
        #[arg(long, env = "NAMELINK_THRESHOLD")]
        threshold: Option<u8>,

        /// Override the minimum number of lists a cluster must span
        #[arg(long)]
        min_coverage: Option<usize>,

        /// Output JSON to stdout instead of a human listing
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write one CSV row per cluster member
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Report names in LEFT with no exact counterpart in RIGHT
    #[command(after_help = "\
Exits 1 when any unreconciled names are reported.

Examples:
  namelink diff rosters.toml cadastro folha
  namelink diff rosters.toml cadastro folha --both --csv differences.csv")]
    Diff {
        /// Path to the run config (.toml)
        config: PathBuf,

        /// List whose names are checked
        left: String,

        /// List searched for counterparts
        right: String,

        /// Also check RIGHT against LEFT
        #[arg(long)]
        both: bool,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write difference records as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Exact set difference of normalized names between two lists
    #[command(after_help = "\
Examples:
  namelink distinct rosters.toml cadastro folha")]
    Distinct {
        /// Path to the run config (.toml)
        config: PathBuf,

        left: String,

        right: String,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Print original and normalized form of every name in a list file
    #[command(after_help = "\
Examples:
  namelink normalize names.txt
  namelink normalize names.txt --csv normalized.csv")]
    Normalize {
        /// Text file, one name per line
        file: PathBuf,

        /// Write CSV to file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Validate a run config and its list files without matching
    Validate {
        /// Path to the run config (.toml)
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Match { config, threshold, min_coverage, json, output, csv } => {
            link::cmd_match(config, threshold, min_coverage, json, output, csv)
        }
        Commands::Diff { config, left, right, both, json, csv } => {
            link::cmd_diff(config, left, right, both, json, csv)
        }
        Commands::Distinct { config, left, right, json } => {
            link::cmd_distinct(config, left, right, json)
        }
        Commands::Normalize { file, csv } => link::cmd_normalize(file, csv),
        Commands::Validate { config } => link::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, msg)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<namelink_linkage::LinkError> for CliError {
    fn from(err: namelink_linkage::LinkError) -> Self {
        let code = link_exit_code(&err);
        let hint = match &err {
            namelink_linkage::LinkError::UnknownListIdentifier(_) => {
                Some("every selected list needs a [lists.<id>] entry".to_string())
            }
            namelink_linkage::LinkError::InvalidConfiguration(_) => {
                Some("threshold is 1-100; min_coverage is 2..number of selected lists".to_string())
            }
            namelink_linkage::LinkError::ConfigParse(_) => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}
