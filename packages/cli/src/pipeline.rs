//! `crime_stats pipeline`: synthetic generation followed by Sankey
//! aggregation, both against the data directory.

use std::path::Path;

use crime_stats_cli_utils::{IndicatifProgress, MultiProgress};
use crime_stats_distributions::DistributionSet;
use crime_stats_synthetic::SyntheticConfig;

use crate::STATE_MONTH_FILE;

/// Runs both stages with default month bounds and the given seed.
///
/// # Errors
///
/// Returns the first stage error; the Sankey stage does not run if
/// generation fails.
pub fn run(
    multi: &MultiProgress,
    data_dir: &Path,
    seed: u64,
    distributions: &DistributionSet,
) -> Result<(), Box<dyn std::error::Error>> {
    let stages = IndicatifProgress::stages_bar(multi, "pipeline", 2);
    let state_month = data_dir.join(STATE_MONTH_FILE);

    stages.set_message("Generating synthetic data".to_string());
    let config = SyntheticConfig {
        seed,
        ..SyntheticConfig::default()
    };
    let generate_progress = IndicatifProgress::records_bar(multi, "Generating states");
    let rows = crime_stats_synthetic::generate(&config, &generate_progress)?;
    crime_stats_synthetic::write_csv(&state_month, &rows)?;
    stages.inc(1);

    stages.set_message("Aggregating Sankey flows".to_string());
    let sankey_progress = IndicatifProgress::records_bar(multi, "Aggregating flows");
    let outputs =
        crime_stats_sankey::run(&state_month, data_dir, distributions, &sankey_progress)?;
    stages.inc(1);

    stages.finish(format!(
        "Pipeline complete: {} offense(s) across {} link(s)",
        outputs.graph.total_offenses,
        outputs.graph.links.len()
    ));
    Ok(())
}
