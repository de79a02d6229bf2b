#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US-level Sankey and demographic outputs from state-month crime counts.
//!
//! Reads a canonical state-month CSV, fans every month's offenses out
//! across the national location, weapon, and offense-type distributions
//! (see [`engine`]), and writes:
//!
//! - `sankey_us.json`: location → weapon → offense flow graph
//! - `age_us.csv` / `sex_us.csv`: the national offender age and sex tables
//!
//! The age and sex tables are copied straight from the distribution set;
//! they are national totals, not derived from the state-month input.
//!
//! Everything is read and aggregated before the first output is written.

pub mod emit;
pub mod engine;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crime_stats_distributions::{DistributionSet, normalize};
use crime_stats_models::FlowGraph;
use crime_stats_models::io::read_records;
use crime_stats_models::progress::ProgressCallback;

pub use engine::{FlowAccumulator, aggregate};

/// Default file name of the flow graph output.
pub const SANKEY_FILE: &str = "sankey_us.json";

/// Default file name of the offender age table.
pub const AGE_FILE: &str = "age_us.csv";

/// Default file name of the offender sex table.
pub const SEX_FILE: &str = "sex_us.csv";

/// Errors that can occur while aggregating or writing Sankey outputs.
#[derive(Debug, thiserror::Error)]
pub enum SankeyError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The state-month CSV could not be read, or a table could not be
    /// written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The flow graph could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two accumulators built from different distributions were merged.
    #[error("cannot merge flow accumulators built from different distributions")]
    IncompatibleAccumulators,
}

/// Paths written by [`run`] along with the aggregated graph.
#[derive(Debug, Clone)]
pub struct SankeyOutputs {
    /// The flow graph that was written.
    pub graph: FlowGraph,
    /// Location of the flow graph JSON.
    pub flow_graph_path: PathBuf,
    /// Location of the offender age CSV.
    pub age_path: PathBuf,
    /// Location of the offender sex CSV.
    pub sex_path: PathBuf,
}

/// Aggregates the state-month CSV at `input` and writes all three outputs
/// into `output_dir`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if any
/// output cannot be written.
pub fn run(
    input: &Path,
    output_dir: &Path,
    distributions: &DistributionSet,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<SankeyOutputs, SankeyError> {
    log::info!("Reading state-month records from {}", input.display());
    let records = read_records(BufReader::new(File::open(input)?))?;
    log::info!("Read {} state-month record(s)", records.len());

    let location = normalize(&distributions.location);
    let weapon = normalize(&distributions.weapon);
    let offense = normalize(&distributions.offense_link);
    log::debug!(
        "Fanning out over {} location(s) x {} weapon(s) x {} offense type(s)",
        location.len(),
        weapon.len(),
        offense.len()
    );

    progress.set_total(records.len() as u64);
    progress.set_message("Aggregating flows".to_string());

    let mut acc = FlowAccumulator::new(&location, &weapon, &offense);
    for record in &records {
        acc.add_record(record);
        progress.inc(1);
    }
    let graph = acc.finish();

    progress.finish(format!(
        "Aggregated {} record(s) into {} link(s)",
        records.len(),
        graph.links.len()
    ));

    std::fs::create_dir_all(output_dir)?;
    let flow_graph_path = output_dir.join(SANKEY_FILE);
    let age_path = output_dir.join(AGE_FILE);
    let sex_path = output_dir.join(SEX_FILE);

    emit::write_flow_graph(&flow_graph_path, &graph)?;
    emit::write_category_counts(&age_path, &distributions.age)?;
    emit::write_category_counts(&sex_path, &distributions.sex)?;

    log::info!(
        "Sankey outputs complete: {} total offense(s)",
        graph.total_offenses
    );

    Ok(SankeyOutputs {
        graph,
        flow_graph_path,
        age_path,
        sex_path,
    })
}
