#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US state identifiers used to key state-month crime statistics.
//!
//! Records can arrive identified by numeric FIPS code, two-letter postal
//! abbreviation, or full state name. The [`fips`] module resolves any of
//! those into a single [`StateInfo`].

pub mod fips;

pub use fips::{STATES, StateInfo, state_by_abbr, state_by_fips, state_by_name};
