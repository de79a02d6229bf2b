#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic monthly crime statistics for every US state + DC.
//!
//! Produces a canonical state-month table with plausible variation:
//! a per-state baseline rate, mid-year seasonality, a small upward trend
//! across the range, and Gaussian noise scaled to the state's population.
//! Output is fully determined by the configured seed.

use std::f64::consts::PI;
use std::path::Path;
use std::sync::Arc;

use crime_stats_geography_models::STATES;
use crime_stats_models::io::{write_atomic, write_records};
use crime_stats_models::progress::ProgressCallback;
use crime_stats_models::{StateMonthRecord, YearMonth};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// First month generated by default.
pub const DEFAULT_START: YearMonth = match YearMonth::new(2021, 1) {
    Some(m) => m,
    None => panic!("invalid default start month"),
};

/// Last month generated by default (inclusive).
pub const DEFAULT_END: YearMonth = match YearMonth::new(2026, 1) {
    Some(m) => m,
    None => panic!("invalid default end month"),
};

/// Errors that can occur while generating synthetic data.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output CSV could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The end month precedes the start month.
    #[error("invalid month range: {start} is after {end}")]
    InvalidRange {
        /// Requested first month.
        start: YearMonth,
        /// Requested last month.
        end: YearMonth,
    },
}

/// Parameters for one synthetic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticConfig {
    /// First month to generate.
    pub start: YearMonth,
    /// Last month to generate (inclusive).
    pub end: YearMonth,
    /// RNG seed.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            seed: DEFAULT_SEED,
        }
    }
}

/// Deterministic population for a state, between roughly 600k and 12.7M.
#[must_use]
pub fn synthetic_population(fips: u32) -> i64 {
    400_000 + i64::from(fips) * 220_000
}

/// Baseline monthly offenses per 100k residents (35-53).
#[must_use]
pub fn base_rate_per_100k(fips: u32) -> f64 {
    f64::from(35 + (fips % 7) * 3)
}

/// Seasonal multiplier for the `index`-th month of the range, peaking a
/// quarter of the way through each 12-month cycle.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seasonality(index: usize) -> f64 {
    0.12f64.mul_add((2.0 * PI * (index % 12) as f64 / 12.0).sin(), 1.0)
}

/// Linear trend multiplier rising from 1.0 to 1.06 over `len` months.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trend(index: usize, len: usize) -> f64 {
    if len < 2 {
        return 1.0;
    }
    (index as f64 / (len - 1) as f64).mul_add(0.06, 1.0)
}

/// Uniform draw from `[0, 1)`.
fn unit(rng: &mut StdRng) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Draws from `N(mean, std_dev)` via the Box-Muller transform.
fn gaussian(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    // (0, 1] so the logarithm stays finite.
    let u1 = 1.0 - unit(rng);
    let u2 = unit(rng);
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    std_dev.mul_add(z, mean)
}

/// Generates one record per state per month, ordered by state then month.
///
/// # Errors
///
/// Returns [`SyntheticError::InvalidRange`] if `config.end` precedes
/// `config.start`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn generate(
    config: &SyntheticConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<StateMonthRecord>, SyntheticError> {
    if config.end < config.start {
        return Err(SyntheticError::InvalidRange {
            start: config.start,
            end: config.end,
        });
    }

    let months = YearMonth::range_inclusive(config.start, config.end);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::with_capacity(STATES.len() * months.len());

    log::info!(
        "Generating {} month(s) ({} to {}) for {} states with seed {}",
        months.len(),
        config.start,
        config.end,
        STATES.len(),
        config.seed
    );
    progress.set_total(STATES.len() as u64);

    for state in STATES {
        let population = synthetic_population(state.fips);
        let scale = population as f64 / 100_000.0;
        let base = base_rate_per_100k(state.fips);
        let state_noise = (unit(&mut rng) - 0.5) * 0.12;

        for (i, month) in months.iter().enumerate() {
            let per_100k = base * seasonality(i) * trend(i, months.len()) * (1.0 + state_noise);
            let noise = gaussian(&mut rng, 0.0, (scale * 5.0).max(1.0));
            let offenses = (scale.mul_add(per_100k, noise).round_ties_even() as i64).max(0);

            let clearance_rate = ((unit(&mut rng) - 0.5)
                .mul_add(0.1, 0.12)
                + 0.01 * f64::from(state.fips % 3))
            .clamp(0.02, 0.28);
            let clearances = (offenses as f64 * clearance_rate).round_ties_even() as i64;

            rows.push(StateMonthRecord {
                month: *month,
                state_fips: Some(state.fips),
                state_abbr: state.abbr.to_string(),
                state_name: state.name.to_string(),
                offenses,
                clearances,
                population,
            });
        }

        progress.inc(1);
    }

    progress.finish(format!("Generated {} rows", rows.len()));
    Ok(rows)
}

/// Writes `records` as a canonical CSV at `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_csv(path: &Path, records: &[StateMonthRecord]) -> Result<(), SyntheticError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    write_atomic::<SyntheticError, _>(path, |out| Ok(write_records(out, records)?))?;
    log::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
