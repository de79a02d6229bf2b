#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `crime_stats`: synthetic data generation, CSV normalization, and
//! national Sankey aggregation for state-month crime statistics.
//!
//! Output lands under `data/` unless `CRIME_STATS_DATA_DIR` points
//! elsewhere. Log output is routed through
//! [`crime_stats_cli_utils::init_logger`] so it does not tear progress bars.

mod categories;
mod pipeline;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crime_stats_cli_utils::IndicatifProgress;
use crime_stats_distributions::{DistributionError, DistributionSet};
use crime_stats_models::YearMonth;
use crime_stats_synthetic::{DEFAULT_END, DEFAULT_SEED, DEFAULT_START, SyntheticConfig};

/// Environment variable overriding the data directory.
const DATA_DIR_ENV: &str = "CRIME_STATS_DATA_DIR";

/// Canonical state-month table inside the data directory.
const STATE_MONTH_FILE: &str = "state_month.csv";

#[derive(Parser)]
#[command(name = "crime_stats", about = "State-month crime statistics toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic state-month table for every state
    Generate {
        /// First month (YYYY-MM)
        #[arg(long, default_value_t = DEFAULT_START)]
        start: YearMonth,

        /// Last month, inclusive (YYYY-MM)
        #[arg(long, default_value_t = DEFAULT_END)]
        end: YearMonth,

        /// RNG seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Output CSV (defaults to `<data dir>/state_month.csv`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Normalize a raw crime CSV into the canonical state-month table
    Prepare {
        /// Raw input CSV
        input: PathBuf,

        /// Output CSV (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Aggregate a state-month table into the national Sankey outputs
    Sankey {
        /// State-month CSV (defaults to `<data dir>/state_month.csv`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory (defaults to the data directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// TOML file overriding the built-in distributions
        #[arg(long)]
        distributions: Option<PathBuf>,
    },
    /// Generate synthetic data, then aggregate it into the data directory
    Pipeline {
        /// RNG seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// TOML file overriding the built-in distributions
        #[arg(long)]
        distributions: Option<PathBuf>,
    },
    /// List the distribution tables with counts and probabilities
    Categories {
        /// TOML file overriding the built-in distributions
        #[arg(long)]
        distributions: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_stats_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            start,
            end,
            seed,
            output,
        } => {
            let output = output.unwrap_or_else(|| data_dir().join(STATE_MONTH_FILE));
            let config = SyntheticConfig { start, end, seed };
            let progress = IndicatifProgress::records_bar(&multi, "Generating states");
            let rows = crime_stats_synthetic::generate(&config, &progress)?;
            crime_stats_synthetic::write_csv(&output, &rows)?;
        }
        Commands::Prepare { input, output } => {
            crime_stats_prepare::prepare_file(&input, output.as_deref())?;
        }
        Commands::Sankey {
            input,
            output_dir,
            distributions,
        } => {
            let dir = data_dir();
            let input = input.unwrap_or_else(|| dir.join(STATE_MONTH_FILE));
            let output_dir = output_dir.unwrap_or(dir);
            let set = load_distributions(distributions.as_deref())?;
            let progress = IndicatifProgress::records_bar(&multi, "Aggregating flows");
            let outputs = crime_stats_sankey::run(&input, &output_dir, &set, &progress)?;
            log::info!("Wrote {}", outputs.flow_graph_path.display());
        }
        Commands::Pipeline {
            seed,
            distributions,
        } => {
            let set = load_distributions(distributions.as_deref())?;
            pipeline::run(&multi, &data_dir(), seed, &set)?;
        }
        Commands::Categories { distributions } => {
            let set = load_distributions(distributions.as_deref())?;
            categories::print(&set);
        }
    }

    Ok(())
}

/// Directory holding the state-month table and the Sankey outputs.
fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV).map_or_else(|| PathBuf::from("data"), PathBuf::from)
}

/// Loads the distribution override file, or the built-in set when none
/// is given.
fn load_distributions(path: Option<&Path>) -> Result<DistributionSet, DistributionError> {
    path.map_or_else(
        || Ok(DistributionSet::builtin().clone()),
        DistributionSet::load,
    )
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["crime_stats", "generate"]).unwrap();
        let Commands::Generate {
            start,
            end,
            seed,
            output,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(start, DEFAULT_START);
        assert_eq!(end, DEFAULT_END);
        assert_eq!(seed, DEFAULT_SEED);
        assert!(output.is_none());
    }

    #[test]
    fn generate_parses_months() {
        let cli = Cli::try_parse_from([
            "crime_stats",
            "generate",
            "--start",
            "2022-06",
            "--end",
            "2022-12",
            "--seed",
            "9",
        ])
        .unwrap();
        let Commands::Generate { start, end, seed, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(start.to_string(), "2022-06");
        assert_eq!(end.to_string(), "2022-12");
        assert_eq!(seed, 9);
    }

    #[test]
    fn rejects_malformed_month() {
        assert!(Cli::try_parse_from(["crime_stats", "generate", "--start", "2022-6"]).is_err());
    }

    #[test]
    fn prepare_requires_input() {
        assert!(Cli::try_parse_from(["crime_stats", "prepare"]).is_err());
        let cli = Cli::try_parse_from(["crime_stats", "prepare", "raw.csv", "--output", "out.csv"])
            .unwrap();
        let Commands::Prepare { input, output } = cli.command else {
            panic!("expected prepare");
        };
        assert_eq!(input, PathBuf::from("raw.csv"));
        assert_eq!(output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn sankey_accepts_output_dir() {
        let cli = Cli::try_parse_from(["crime_stats", "sankey", "--output-dir", "out"]).unwrap();
        let Commands::Sankey {
            input, output_dir, ..
        } = cli.command
        else {
            panic!("expected sankey");
        };
        assert!(input.is_none());
        assert_eq!(output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn builtin_distributions_without_override() {
        let set = load_distributions(None).unwrap();
        assert_eq!(&set, DistributionSet::builtin());
    }
}
