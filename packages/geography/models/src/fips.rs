//! US state FIPS code utilities.
//!
//! Provides mappings between numeric FIPS codes, two-letter state
//! abbreviations, and full state names for the 50 US states + DC.

/// Identifiers for a single US state (or DC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateInfo {
    /// Numeric state FIPS code (e.g. `6` for California).
    pub fips: u32,
    /// Two-letter postal abbreviation.
    pub abbr: &'static str,
    /// Full state name.
    pub name: &'static str,
}

const fn state(fips: u32, abbr: &'static str, name: &'static str) -> StateInfo {
    StateInfo { fips, abbr, name }
}

/// The 50 US states + DC, ordered by FIPS code.
pub const STATES: &[StateInfo] = &[
    state(1, "AL", "Alabama"),
    state(2, "AK", "Alaska"),
    state(4, "AZ", "Arizona"),
    state(5, "AR", "Arkansas"),
    state(6, "CA", "California"),
    state(8, "CO", "Colorado"),
    state(9, "CT", "Connecticut"),
    state(10, "DE", "Delaware"),
    state(11, "DC", "District of Columbia"),
    state(12, "FL", "Florida"),
    state(13, "GA", "Georgia"),
    state(15, "HI", "Hawaii"),
    state(16, "ID", "Idaho"),
    state(17, "IL", "Illinois"),
    state(18, "IN", "Indiana"),
    state(19, "IA", "Iowa"),
    state(20, "KS", "Kansas"),
    state(21, "KY", "Kentucky"),
    state(22, "LA", "Louisiana"),
    state(23, "ME", "Maine"),
    state(24, "MD", "Maryland"),
    state(25, "MA", "Massachusetts"),
    state(26, "MI", "Michigan"),
    state(27, "MN", "Minnesota"),
    state(28, "MS", "Mississippi"),
    state(29, "MO", "Missouri"),
    state(30, "MT", "Montana"),
    state(31, "NE", "Nebraska"),
    state(32, "NV", "Nevada"),
    state(33, "NH", "New Hampshire"),
    state(34, "NJ", "New Jersey"),
    state(35, "NM", "New Mexico"),
    state(36, "NY", "New York"),
    state(37, "NC", "North Carolina"),
    state(38, "ND", "North Dakota"),
    state(39, "OH", "Ohio"),
    state(40, "OK", "Oklahoma"),
    state(41, "OR", "Oregon"),
    state(42, "PA", "Pennsylvania"),
    state(44, "RI", "Rhode Island"),
    state(45, "SC", "South Carolina"),
    state(46, "SD", "South Dakota"),
    state(47, "TN", "Tennessee"),
    state(48, "TX", "Texas"),
    state(49, "UT", "Utah"),
    state(50, "VT", "Vermont"),
    state(51, "VA", "Virginia"),
    state(53, "WA", "Washington"),
    state(54, "WV", "West Virginia"),
    state(55, "WI", "Wisconsin"),
    state(56, "WY", "Wyoming"),
];

/// Looks up a state by numeric FIPS code.
///
/// Returns `None` for unrecognized codes (including territories).
#[must_use]
pub fn state_by_fips(fips: u32) -> Option<&'static StateInfo> {
    STATES
        .binary_search_by_key(&fips, |s| s.fips)
        .ok()
        .map(|idx| &STATES[idx])
}

/// Looks up a state by its two-letter abbreviation (case-insensitive,
/// surrounding whitespace ignored).
#[must_use]
pub fn state_by_abbr(abbr: &str) -> Option<&'static StateInfo> {
    let abbr = abbr.trim();
    STATES.iter().find(|s| s.abbr.eq_ignore_ascii_case(abbr))
}

/// Looks up a state by its exact full name (e.g. `"New York"`).
#[must_use]
pub fn state_by_name(name: &str) -> Option<&'static StateInfo> {
    STATES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn states_sorted_by_fips() {
        assert!(STATES.windows(2).all(|w| w[0].fips < w[1].fips));
    }

    #[test]
    fn abbr_roundtrip() {
        for s in STATES {
            let by_abbr = state_by_abbr(s.abbr).unwrap();
            assert_eq!(by_abbr.fips, s.fips, "roundtrip failed for {}", s.abbr);
            assert_eq!(state_by_fips(s.fips), Some(s));
            assert_eq!(state_by_name(s.name), Some(s));
        }
    }

    #[test]
    fn unknown_identifiers() {
        assert_eq!(state_by_fips(3), None);
        assert_eq!(state_by_fips(72), None);
        assert_eq!(state_by_abbr("XX"), None);
        assert_eq!(state_by_name("Puerto Rico"), None);
    }

    #[test]
    fn case_insensitive_abbr() {
        assert_eq!(state_by_abbr("ca").map(|s| s.fips), Some(6));
        assert_eq!(state_by_abbr(" Ca ").map(|s| s.fips), Some(6));
        assert_eq!(state_by_abbr("CA").map(|s| s.fips), Some(6));
    }

    #[test]
    fn name_lookup_is_exact() {
        assert_eq!(state_by_name("District of Columbia").map(|s| s.abbr), Some("DC"));
        assert_eq!(state_by_name("new york"), None);
    }
}
