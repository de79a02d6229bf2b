//! Header detection for raw crime CSVs.

use csv::StringRecord;

use crate::PrepareError;

const DATE_COLUMNS: &[&str] = &["month", "date", "incident_date", "reported_date"];
const FIPS_COLUMNS: &[&str] = &["state_fips", "fips"];
const ABBR_COLUMNS: &[&str] = &["state_abbr", "state", "abbr"];
const NAME_COLUMNS: &[&str] = &["state_name", "state_name_full", "state_full", "state_name_raw"];
const OFFENSE_COLUMNS: &[&str] = &["offenses", "offense_count", "count", "incidents", "n"];
const CLEARANCE_COLUMNS: &[&str] = &[
    "clearances",
    "clearance",
    "clearance_count",
    "clearances_count",
];
const POPULATION_COLUMNS: &[&str] = &["population", "pop", "state_population"];

/// Column positions resolved from an input header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub fips: Option<usize>,
    pub abbr: Option<usize>,
    pub name: Option<usize>,
    pub offenses: Option<usize>,
    pub clearances: Option<usize>,
    pub population: Option<usize>,
}

impl ColumnMap {
    /// Resolves each field to the first candidate column present in
    /// `headers`. Header names are compared after trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PrepareError::MissingColumn`] if no date column is present,
    /// or if none of the FIPS, abbreviation, or name columns are.
    pub fn detect(headers: &StringRecord) -> Result<Self, PrepareError> {
        let date = find(headers, DATE_COLUMNS).ok_or(PrepareError::MissingColumn {
            field: "date/month",
        })?;
        let fips = find(headers, FIPS_COLUMNS);
        let abbr = find(headers, ABBR_COLUMNS);
        let name = find(headers, NAME_COLUMNS);
        if fips.is_none() && abbr.is_none() && name.is_none() {
            return Err(PrepareError::MissingColumn {
                field: "state identifier (fips/abbr/name)",
            });
        }

        let map = Self {
            date,
            fips,
            abbr,
            name,
            offenses: find(headers, OFFENSE_COLUMNS),
            clearances: find(headers, CLEARANCE_COLUMNS),
            population: find(headers, POPULATION_COLUMNS),
        };
        log::debug!("Detected columns: {map:?}");
        Ok(map)
    }
}

fn find(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h.trim() == *c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn detects_canonical_header() {
        let map = ColumnMap::detect(&headers(&[
            "month",
            "state_fips",
            "state_abbr",
            "state_name",
            "offenses",
            "clearances",
            "population",
        ]))
        .unwrap();
        assert_eq!(
            map,
            ColumnMap {
                date: 0,
                fips: Some(1),
                abbr: Some(2),
                name: Some(3),
                offenses: Some(4),
                clearances: Some(5),
                population: Some(6),
            }
        );
    }

    #[test]
    fn prefers_earlier_candidates() {
        let map = ColumnMap::detect(&headers(&["date", "n", "state", "month", "count"])).unwrap();
        assert_eq!(map.date, 3);
        assert_eq!(map.offenses, Some(4));
        assert_eq!(map.abbr, Some(2));
        assert_eq!(map.clearances, None);
    }

    #[test]
    fn trims_header_whitespace() {
        let map = ColumnMap::detect(&headers(&[" incident_date ", " fips"])).unwrap();
        assert_eq!(map.date, 0);
        assert_eq!(map.fips, Some(1));
    }

    #[test]
    fn missing_date_column() {
        let err = ColumnMap::detect(&headers(&["state", "offenses"])).unwrap_err();
        assert!(matches!(
            err,
            PrepareError::MissingColumn {
                field: "date/month"
            }
        ));
    }

    #[test]
    fn missing_state_column() {
        let err = ColumnMap::detect(&headers(&["month", "offenses"])).unwrap_err();
        assert!(err.to_string().contains("state identifier"));
    }
}
