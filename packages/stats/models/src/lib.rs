#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical state-month record format and flow graph types.
//!
//! Both state-month producers (the synthetic generator and the format
//! normalizer) emit [`StateMonthRecord`] rows with the [`CANONICAL_HEADER`]
//! columns. The Sankey aggregator consumes those rows and produces a
//! [`FlowGraph`].

pub mod flow;
pub mod io;
pub mod lenient;
pub mod month;
pub mod progress;

use serde::{Deserialize, Serialize};

pub use flow::{FlowGraph, FlowLink, FlowNode};
pub use month::{InvalidMonthError, YearMonth};

/// Column order of a canonical state-month CSV.
pub const CANONICAL_HEADER: [&str; 7] = [
    "month",
    "state_fips",
    "state_abbr",
    "state_name",
    "offenses",
    "clearances",
    "population",
];

/// Crime counts for one US state in one calendar month.
///
/// `(month, state_fips)` is unique within a canonical table. When read,
/// `month` and `offenses` must parse exactly; blank or malformed
/// `state_fips`, `clearances`, and `population` values read as `None`/0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMonthRecord {
    /// Calendar month of the observation.
    pub month: YearMonth,
    /// Numeric state FIPS code. `None` when the normalizer could not
    /// resolve the row's state.
    #[serde(deserialize_with = "lenient::fips_or_none")]
    pub state_fips: Option<u32>,
    /// Two-letter state abbreviation (may be empty).
    pub state_abbr: String,
    /// Full state name (may be empty).
    pub state_name: String,
    /// Reported offenses.
    pub offenses: i64,
    /// Offenses cleared. Not validated against `offenses`.
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub clearances: i64,
    /// State population. Informational only.
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub population: i64,
}
