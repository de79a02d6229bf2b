#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Converts heterogeneous crime CSVs into canonical state-month tables.
//!
//! Input columns are detected by name (see [`columns`]), dates are reduced
//! to their calendar month, and states are resolved from whichever of
//! FIPS code, postal abbreviation, or full name the input carries. Rows
//! sharing a month and state are combined: offenses and clearances are
//! summed and the largest population is kept.

pub mod columns;
pub mod parsing;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crime_stats_geography_models::{state_by_abbr, state_by_fips, state_by_name};
use crime_stats_models::io::{write_atomic, write_records};
use crime_stats_models::{StateMonthRecord, YearMonth};

use crate::columns::ColumnMap;
use crate::parsing::{coerce_count, parse_fips, parse_month};

/// Errors that can occur while normalizing an input CSV.
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be read or the output could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No column in the input header matched a required field.
    #[error("could not detect {field} column in input")]
    MissingColumn {
        /// The field that could not be detected.
        field: &'static str,
    },
}

/// Outcome of a [`normalize`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Aggregated rows ordered by month, then state FIPS (unresolved
    /// states first).
    pub records: Vec<StateMonthRecord>,
    /// Data rows read from the input.
    pub rows_read: u64,
    /// Rows dropped because their date could not be parsed.
    pub rows_skipped: u64,
    /// Rows kept whose state could not be resolved.
    pub unresolved_states: u64,
}

#[derive(Debug, Default)]
struct Totals {
    offenses: i64,
    clearances: i64,
    population: i64,
}

/// Reads a raw crime CSV and aggregates it into canonical records.
///
/// Group sums saturate at `i64::MAX` rather than overflowing.
///
/// # Errors
///
/// Returns [`PrepareError::MissingColumn`] if the header lacks a date or
/// state identifier column, or [`PrepareError::Csv`] if the input is not
/// valid CSV.
pub fn normalize<R: Read>(reader: R) -> Result<Normalized, PrepareError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::detect(rdr.headers()?)?;

    let mut groups: BTreeMap<(YearMonth, Option<u32>), Totals> = BTreeMap::new();
    let mut rows_read = 0u64;
    let mut rows_skipped = 0u64;
    let mut unresolved_states = 0u64;

    for row in rdr.records() {
        let row = row?;
        rows_read += 1;
        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i));

        let Some(month) = field(Some(columns.date)).and_then(parse_month) else {
            rows_skipped += 1;
            continue;
        };

        let fips = resolve_state(
            field(columns.fips),
            field(columns.abbr),
            field(columns.name),
        );
        if fips.is_none() {
            unresolved_states += 1;
        }

        let totals = groups.entry((month, fips)).or_default();
        totals.offenses = totals
            .offenses
            .saturating_add(coerce_count(field(columns.offenses)));
        totals.clearances = totals
            .clearances
            .saturating_add(coerce_count(field(columns.clearances)));
        totals.population = totals.population.max(coerce_count(field(columns.population)));
    }

    if rows_skipped > 0 {
        log::warn!("Skipped {rows_skipped} row(s) with unparsable dates");
    }
    if unresolved_states > 0 {
        log::warn!("{unresolved_states} row(s) have an unresolved state");
    }

    let records = groups
        .into_iter()
        .map(|((month, state_fips), totals)| {
            let known = state_fips.and_then(state_by_fips);
            StateMonthRecord {
                month,
                state_fips,
                state_abbr: known.map(|s| s.abbr.to_string()).unwrap_or_default(),
                state_name: known.map(|s| s.name.to_string()).unwrap_or_default(),
                offenses: totals.offenses,
                clearances: totals.clearances,
                population: totals.population,
            }
        })
        .collect::<Vec<_>>();

    log::info!(
        "Normalized {rows_read} row(s) into {} state-month record(s)",
        records.len()
    );

    Ok(Normalized {
        records,
        rows_read,
        rows_skipped,
        unresolved_states,
    })
}

/// Resolves a state FIPS code from a row's identifier fields.
///
/// A usable FIPS value wins, even if it names no known state; otherwise
/// the abbreviation is tried (case-insensitively), then the exact name.
fn resolve_state(fips: Option<&str>, abbr: Option<&str>, name: Option<&str>) -> Option<u32> {
    fips.and_then(parse_fips)
        .or_else(|| abbr.and_then(state_by_abbr).map(|s| s.fips))
        .or_else(|| name.and_then(|n| state_by_name(n.trim())).map(|s| s.fips))
}

/// Normalizes the CSV at `input` and writes the canonical table to
/// `output`, or to stdout when `output` is `None`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or normalized, or if the
/// output cannot be written.
pub fn prepare_file(input: &Path, output: Option<&Path>) -> Result<Normalized, PrepareError> {
    log::info!("Normalizing {}", input.display());
    let normalized = normalize(BufReader::new(File::open(input)?))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            write_atomic::<PrepareError, _>(path, |out| {
                Ok(write_records(out, &normalized.records)?)
            })?;
            log::info!(
                "Wrote {} record(s) to {}",
                normalized.records.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_records(&mut stdout, &normalized.records)?;
            stdout.flush()?;
        }
    }

    Ok(normalized)
}
