#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! National category distribution tables.
//!
//! Each [`DistributionTable`] maps a category label (an offender age
//! bracket, a weapon, an incident location, ...) to an observed national
//! count. [`normalize`] turns a table into the probabilities used to fan a
//! state-month offense count out across that category.
//!
//! The compiled-in reference tables are exposed through
//! [`DistributionSet::builtin`]; a TOML file can replace any of them (see
//! [`config`]).

pub mod config;
pub mod defaults;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while building or loading distribution tables.
#[derive(Debug, thiserror::Error)]
pub enum DistributionError {
    /// The override file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The override file is not valid TOML for a distribution set.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A label appears more than once within a single table.
    #[error("duplicate label '{label}' in {category} distribution")]
    DuplicateLabel {
        /// Table containing the duplicate.
        category: Category,
        /// The repeated label.
        label: String,
    },
}

/// The five distribution tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// Offender age bracket
    Age,
    /// Offender sex
    Sex,
    /// Incident location type
    Location,
    /// Weapon involved
    Weapon,
    /// Offense type linked to the incident
    OffenseLink,
}

impl Category {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Age,
            Self::Sex,
            Self::Location,
            Self::Weapon,
            Self::OffenseLink,
        ]
    }
}

/// Ordered label → observed count table. Labels are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionTable {
    category: Category,
    entries: Vec<(String, u64)>,
}

impl DistributionTable {
    /// Builds a table, preserving entry order.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::DuplicateLabel`] if a label repeats.
    pub fn new(category: Category, entries: Vec<(String, u64)>) -> Result<Self, DistributionError> {
        let mut seen = BTreeSet::new();
        for (label, _) in &entries {
            if !seen.insert(label.as_str()) {
                return Err(DistributionError::DuplicateLabel {
                    category,
                    label: label.clone(),
                });
            }
        }
        Ok(Self { category, entries })
    }

    /// Builds a table from compiled-in `(label, count)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if a label repeats. Only used with the built-in tables, whose
    /// labels are checked by tests.
    #[must_use]
    pub fn from_static(category: Category, entries: &[(&str, u64)]) -> Self {
        Self::new(
            category,
            entries
                .iter()
                .map(|(label, count)| ((*label).to_string(), *count))
                .collect(),
        )
        .expect("built-in distribution tables have unique labels")
    }

    /// Which table this is.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Iterates `(label, count)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Returns the count recorded for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }
}

/// Label → probability table derived from a [`DistributionTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDistribution {
    entries: Vec<(String, f64)>,
}

impl NormalizedDistribution {
    /// Builds a distribution directly from `(label, probability)` pairs.
    #[must_use]
    pub const fn from_probabilities(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Iterates `(label, probability)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the probability assigned to `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// Sum of all probabilities (1.0 up to rounding, or 0.0 for a
    /// zero-total table).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }
}

/// Converts observed counts into probabilities (`count / total`).
///
/// A table whose counts sum to zero yields all-zero probabilities, which
/// makes that category a no-op in aggregation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalize(table: &DistributionTable) -> NormalizedDistribution {
    let total = table.total();
    let entries = table
        .iter()
        .map(|(label, count)| {
            let p = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            (label.to_string(), p)
        })
        .collect();
    NormalizedDistribution { entries }
}

/// The five tables used by one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSet {
    /// Offender age brackets.
    pub age: DistributionTable,
    /// Offender sex.
    pub sex: DistributionTable,
    /// Incident locations.
    pub location: DistributionTable,
    /// Weapons.
    pub weapon: DistributionTable,
    /// Linked offense types.
    pub offense_link: DistributionTable,
}

static BUILTIN: LazyLock<DistributionSet> = LazyLock::new(|| DistributionSet {
    age: DistributionTable::from_static(Category::Age, defaults::OFFENDER_AGE),
    sex: DistributionTable::from_static(Category::Sex, defaults::OFFENDER_SEX),
    location: DistributionTable::from_static(Category::Location, defaults::LOCATION),
    weapon: DistributionTable::from_static(Category::Weapon, defaults::WEAPON),
    offense_link: DistributionTable::from_static(Category::OffenseLink, defaults::OFFENSE_LINK),
});

impl DistributionSet {
    /// The compiled-in reference tables, built once per process.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Returns the table for `category`.
    #[must_use]
    pub const fn get(&self, category: Category) -> &DistributionTable {
        match category {
            Category::Age => &self.age,
            Category::Sex => &self.sex,
            Category::Location => &self.location,
            Category::Weapon => &self.weapon,
            Category::OffenseLink => &self.offense_link,
        }
    }

    const fn get_mut(&mut self, category: Category) -> &mut DistributionTable {
        match category {
            Category::Age => &mut self.age,
            Category::Sex => &mut self.sex,
            Category::Location => &mut self.location,
            Category::Weapon => &mut self.weapon,
            Category::OffenseLink => &mut self.offense_link,
        }
    }
}
