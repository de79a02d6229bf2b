//! TOML overrides for the built-in distribution tables.
//!
//! An override file lists `{ label, count }` entries per category. Any
//! category left out keeps its built-in table:
//!
//! ```toml
//! [[weapon]]
//! label = "Handgun"
//! count = 10
//!
//! [[weapon]]
//! label = "Knife/Cutting Instrument"
//! count = 5
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{Category, DistributionError, DistributionSet, DistributionTable};

/// One `(label, count)` entry of an override table.
#[derive(Debug, Deserialize)]
struct OverrideEntry {
    label: String,
    count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DistributionOverrides {
    age: Option<Vec<OverrideEntry>>,
    sex: Option<Vec<OverrideEntry>>,
    location: Option<Vec<OverrideEntry>>,
    weapon: Option<Vec<OverrideEntry>>,
    offense_link: Option<Vec<OverrideEntry>>,
}

impl DistributionOverrides {
    fn take(&mut self, category: Category) -> Option<Vec<OverrideEntry>> {
        match category {
            Category::Age => self.age.take(),
            Category::Sex => self.sex.take(),
            Category::Location => self.location.take(),
            Category::Weapon => self.weapon.take(),
            Category::OffenseLink => self.offense_link.take(),
        }
    }
}

impl DistributionSet {
    /// Parses an override file, starting from the built-in tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, names an unknown
    /// category, or repeats a label within a category.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, DistributionError> {
        let mut overrides: DistributionOverrides = toml::from_str(toml_str)?;
        let mut set = Self::builtin().clone();

        for category in Category::all() {
            if let Some(entries) = overrides.take(*category) {
                log::info!(
                    "Overriding {category} distribution with {} label(s)",
                    entries.len()
                );
                let entries = entries.into_iter().map(|e| (e.label, e.count)).collect();
                *set.get_mut(*category) = DistributionTable::new(*category, entries)?;
            }
        }

        Ok(set)
    }

    /// Reads and parses an override file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, DistributionError> {
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded distribution overrides from {}", path.display());
        Self::from_toml_str(&contents)
    }
}
