//! Proportional fan-out of offense counts into a location → weapon →
//! offense flow graph.
//!
//! Every record's offense count is split across each (location, weapon,
//! offense) combination in proportion to `P(location) * P(weapon) *
//! P(offense)`. The same fanned-out quantity feeds both hops of the flow:
//! it is added to the (location, weapon) edge and to the (weapon, offense)
//! edge. Location and offense are therefore modeled as independent given
//! the weapon, not as a joint distribution.

use std::collections::{BTreeMap, BTreeSet};

use crime_stats_distributions::NormalizedDistribution;
use crime_stats_models::{FlowGraph, FlowLink, FlowNode, StateMonthRecord};

use crate::SankeyError;

/// Labels and probabilities of one fan-out dimension, split for indexed
/// access.
#[derive(Debug, Clone, PartialEq)]
struct Dimension {
    labels: Vec<String>,
    probs: Vec<f64>,
}

impl From<&NormalizedDistribution> for Dimension {
    fn from(dist: &NormalizedDistribution) -> Self {
        let (labels, probs) = dist.iter().map(|(l, p)| (l.to_string(), p)).unzip();
        Self { labels, probs }
    }
}

/// An edge cell touched for the first time, in observation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSlot {
    /// Index into the location × weapon matrix.
    LocationWeapon(usize),
    /// Index into the weapon × offense matrix.
    WeaponOffense(usize),
}

/// Accumulates flow totals over any number of state-month records.
///
/// Edge weights live in two dense matrices (location × weapon and
/// weapon × offense). The order in which cells were first touched is
/// recorded so [`finish`](Self::finish) can emit links in first-seen order.
#[derive(Debug, Clone)]
pub struct FlowAccumulator {
    location: Dimension,
    weapon: Dimension,
    offense: Dimension,
    /// `P(location) * P(weapon)`, row-major by location.
    location_weapon_probs: Vec<f64>,
    location_weapon: Vec<f64>,
    weapon_offense: Vec<f64>,
    location_weapon_seen: Vec<bool>,
    weapon_offense_seen: Vec<bool>,
    order: Vec<EdgeSlot>,
    total_offenses: i64,
    records: u64,
}

impl FlowAccumulator {
    /// Creates an empty accumulator for the given distributions.
    #[must_use]
    pub fn new(
        location: &NormalizedDistribution,
        weapon: &NormalizedDistribution,
        offense: &NormalizedDistribution,
    ) -> Self {
        let location = Dimension::from(location);
        let weapon = Dimension::from(weapon);
        let offense = Dimension::from(offense);

        let location_weapon_probs: Vec<f64> = location
            .probs
            .iter()
            .flat_map(|pl| weapon.probs.iter().map(move |pw| pl * pw))
            .collect();

        let lw = location.labels.len() * weapon.labels.len();
        let wo = weapon.labels.len() * offense.labels.len();

        Self {
            location,
            weapon,
            offense,
            location_weapon_probs,
            location_weapon: vec![0.0; lw],
            weapon_offense: vec![0.0; wo],
            location_weapon_seen: vec![false; lw],
            weapon_offense_seen: vec![false; wo],
            order: Vec::new(),
            total_offenses: 0,
            records: 0,
        }
    }

    /// Number of records added so far.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Running sum of `offenses` over every added record, saturating at
    /// the `i64` bounds.
    #[must_use]
    pub const fn total_offenses(&self) -> i64 {
        self.total_offenses
    }

    /// Fans one record's offenses out across every combination.
    ///
    /// Records with `offenses <= 0` count toward the total but create no
    /// edges. Combinations whose flow is not positive are skipped, so a
    /// label with zero probability never gains an edge.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_record(&mut self, record: &StateMonthRecord) {
        self.records += 1;
        self.total_offenses = self.total_offenses.saturating_add(record.offenses);

        if record.offenses <= 0 {
            return;
        }
        let offenses = record.offenses as f64;

        let weapons = self.weapon.labels.len();
        let offense_types = self.offense.labels.len();

        for (lw, pair_prob) in self.location_weapon_probs.iter().enumerate() {
            let weapon_count = offenses * pair_prob;
            if weapon_count <= 0.0 {
                continue;
            }
            let w = lw % weapons;
            let row = w * offense_types;

            let mut pair_flow = 0.0;
            for (o, po) in self.offense.probs.iter().enumerate() {
                let flow = weapon_count * po;
                if flow <= 0.0 {
                    continue;
                }

                if !self.location_weapon_seen[lw] {
                    self.location_weapon_seen[lw] = true;
                    self.order.push(EdgeSlot::LocationWeapon(lw));
                }
                let wo = row + o;
                if !self.weapon_offense_seen[wo] {
                    self.weapon_offense_seen[wo] = true;
                    self.order.push(EdgeSlot::WeaponOffense(wo));
                }

                pair_flow += flow;
                self.weapon_offense[wo] += flow;
            }
            self.location_weapon[lw] += pair_flow;
        }
    }

    /// Folds another accumulator's totals into this one.
    ///
    /// Links first seen only by `other` are ordered after this
    /// accumulator's links.
    ///
    /// # Errors
    ///
    /// Returns [`SankeyError::IncompatibleAccumulators`] if `other` was
    /// built from different distributions.
    pub fn merge(&mut self, other: &Self) -> Result<(), SankeyError> {
        if self.location != other.location
            || self.weapon != other.weapon
            || self.offense != other.offense
        {
            return Err(SankeyError::IncompatibleAccumulators);
        }

        for slot in &other.order {
            match *slot {
                EdgeSlot::LocationWeapon(i) if !self.location_weapon_seen[i] => {
                    self.location_weapon_seen[i] = true;
                    self.order.push(*slot);
                }
                EdgeSlot::WeaponOffense(i) if !self.weapon_offense_seen[i] => {
                    self.weapon_offense_seen[i] = true;
                    self.order.push(*slot);
                }
                _ => {}
            }
        }
        for (acc, v) in self.location_weapon.iter_mut().zip(&other.location_weapon) {
            *acc += v;
        }
        for (acc, v) in self.weapon_offense.iter_mut().zip(&other.weapon_offense) {
            *acc += v;
        }
        self.total_offenses = self.total_offenses.saturating_add(other.total_offenses);
        self.records += other.records;
        Ok(())
    }

    /// Finalizes the accumulated totals into a [`FlowGraph`].
    ///
    /// Edges sharing a (source, target) label pair are combined. Values are
    /// rounded half-to-even.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn finish(self) -> FlowGraph {
        let weapons = self.weapon.labels.len();
        let offense_types = self.offense.labels.len();

        let mut edges: Vec<(&str, &str, f64)> = Vec::with_capacity(self.order.len());
        let mut index: BTreeMap<(&str, &str), usize> = BTreeMap::new();

        for slot in &self.order {
            let (source, target, value) = match *slot {
                EdgeSlot::LocationWeapon(i) => (
                    self.location.labels[i / weapons].as_str(),
                    self.weapon.labels[i % weapons].as_str(),
                    self.location_weapon[i],
                ),
                EdgeSlot::WeaponOffense(i) => (
                    self.weapon.labels[i / offense_types].as_str(),
                    self.offense.labels[i % offense_types].as_str(),
                    self.weapon_offense[i],
                ),
            };
            match index.get(&(source, target)) {
                Some(&pos) => edges[pos].2 += value,
                None => {
                    index.insert((source, target), edges.len());
                    edges.push((source, target, value));
                }
            }
        }

        let labels: BTreeSet<&str> = edges.iter().flat_map(|(s, t, _)| [*s, *t]).collect();

        log::debug!(
            "Finalized {} link(s) over {} node(s) from {} record(s)",
            edges.len(),
            labels.len(),
            self.records
        );

        FlowGraph {
            nodes: labels
                .into_iter()
                .map(|id| FlowNode { id: id.to_string() })
                .collect(),
            links: edges
                .into_iter()
                .map(|(source, target, value)| FlowLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    value: value.round_ties_even() as u64,
                })
                .collect(),
            total_offenses: self.total_offenses,
        }
    }
}

/// Aggregates `records` into a flow graph in a single pass.
#[must_use]
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a StateMonthRecord>,
    location: &NormalizedDistribution,
    weapon: &NormalizedDistribution,
    offense: &NormalizedDistribution,
) -> FlowGraph {
    let mut acc = FlowAccumulator::new(location, weapon, offense);
    for record in records {
        acc.add_record(record);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crime_stats_distributions::{
        Category, DistributionSet, DistributionTable, normalize,
    };

    use super::*;

    fn dist(entries: &[(&str, u64)]) -> NormalizedDistribution {
        normalize(&DistributionTable::from_static(Category::Location, entries))
    }

    fn record(fips: u32, offenses: i64) -> StateMonthRecord {
        StateMonthRecord {
            month: "2021-01".parse().unwrap(),
            state_fips: Some(fips),
            state_abbr: String::new(),
            state_name: String::new(),
            offenses,
            clearances: 0,
            population: 0,
        }
    }

    #[test]
    fn fans_out_single_record() {
        let location = dist(&[("A", 1), ("B", 1)]);
        let weapon = dist(&[("X", 2), ("Y", 0)]);
        let offense = dist(&[("F", 1)]);

        let graph = aggregate(&[record(1, 100)], &location, &weapon, &offense);

        assert_eq!(graph.link_value("A", "X"), Some(50));
        assert_eq!(graph.link_value("B", "X"), Some(50));
        assert_eq!(graph.link_value("X", "F"), Some(100));
        assert!(graph.links.iter().all(|l| l.target != "Y" && l.source != "Y"));
        assert_eq!(graph.total_offenses, 100);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "F", "X"]);
    }

    #[test]
    fn links_follow_first_seen_order() {
        let location = dist(&[("L1", 1), ("L2", 1)]);
        let weapon = dist(&[("W1", 1), ("W2", 1)]);
        let offense = dist(&[("O1", 1), ("O2", 1)]);

        let graph = aggregate(&[record(1, 8)], &location, &weapon, &offense);
        let pairs: Vec<(&str, &str)> = graph
            .links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("L1", "W1"),
                ("W1", "O1"),
                ("W1", "O2"),
                ("L1", "W2"),
                ("W2", "O1"),
                ("W2", "O2"),
                ("L2", "W1"),
                ("L2", "W2"),
            ]
        );
        // Both hops carry the same fanned-out quantity.
        assert!(graph.links.iter().all(|l| l.value == 2));
    }

    #[test]
    fn zero_and_negative_records_add_no_edges() {
        let location = dist(&[("A", 3), ("B", 1)]);
        let weapon = dist(&[("X", 1)]);
        let offense = dist(&[("F", 1)]);

        let base = aggregate(&[record(1, 40)], &location, &weapon, &offense);
        let padded = aggregate(
            &[record(2, 0), record(1, 40), record(3, 0), record(4, -5)],
            &location,
            &weapon,
            &offense,
        );

        assert_eq!(base.links, padded.links);
        assert_eq!(base.nodes, padded.nodes);
        assert_eq!(padded.total_offenses, 35);
    }

    #[test]
    fn only_zero_records_produce_empty_graph() {
        let location = dist(&[("A", 1)]);
        let graph = aggregate(&[record(1, 0), record(2, 0)], &location, &location, &location);
        assert!(graph.links.is_empty());
        assert!(graph.nodes.is_empty());
        assert_eq!(graph.total_offenses, 0);
    }

    #[test]
    fn zero_total_dimension_produces_no_edges() {
        let location = dist(&[("A", 1)]);
        let weapon = dist(&[("X", 0), ("Y", 0)]);
        let offense = dist(&[("F", 1)]);
        let graph = aggregate(&[record(1, 1_000)], &location, &weapon, &offense);
        assert!(graph.links.is_empty());
        assert!(graph.nodes.is_empty());
        assert_eq!(graph.total_offenses, 1_000);
    }

    #[test]
    fn nodes_are_exactly_link_endpoints() {
        let set = DistributionSet::builtin();
        let graph = aggregate(
            &[record(6, 5_000), record(36, 7_000)],
            &normalize(&set.location),
            &normalize(&set.weapon),
            &normalize(&set.offense_link),
        );
        let endpoints: BTreeSet<&str> = graph
            .links
            .iter()
            .flat_map(|l| [l.source.as_str(), l.target.as_str()])
            .collect();
        let nodes: BTreeSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(endpoints, nodes);
        assert!(!nodes.contains("Cyberspace"));
        assert!(!nodes.contains("Not Specified"));
        assert!(graph.nodes.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn order_independent() {
        let set = DistributionSet::builtin();
        let location = normalize(&set.location);
        let weapon = normalize(&set.weapon);
        let offense = normalize(&set.offense_link);

        let records: Vec<StateMonthRecord> =
            (1..=12).map(|i| record(i, i64::from(i) * 1_337)).collect();
        let reversed: Vec<StateMonthRecord> = records.iter().rev().cloned().collect();

        let forward = aggregate(&records, &location, &weapon, &offense);
        let backward = aggregate(&reversed, &location, &weapon, &offense);

        assert_eq!(forward.total_offenses, backward.total_offenses);
        assert_eq!(forward.nodes, backward.nodes);
        assert_eq!(forward.links.len(), backward.links.len());
        for (a, b) in forward.links.iter().zip(&backward.links) {
            assert_eq!((&a.source, &a.target), (&b.source, &b.target));
            assert!(a.value.abs_diff(b.value) <= 1, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn merge_matches_single_pass() {
        let location = dist(&[("A", 1), ("B", 3)]);
        let weapon = dist(&[("X", 1), ("Y", 1)]);
        let offense = dist(&[("F", 1), ("G", 4)]);
        let records = [record(1, 120), record(2, 0), record(3, 80), record(4, 400)];

        let single = aggregate(&records, &location, &weapon, &offense);

        let mut left = FlowAccumulator::new(&location, &weapon, &offense);
        let mut right = FlowAccumulator::new(&location, &weapon, &offense);
        for r in &records[..2] {
            left.add_record(r);
        }
        for r in &records[2..] {
            right.add_record(r);
        }
        left.merge(&right).unwrap();
        assert_eq!(left.records(), 4);
        assert_eq!(left.finish(), single);
    }

    #[test]
    fn merge_rejects_different_distributions() {
        let a = dist(&[("A", 1)]);
        let b = dist(&[("B", 1)]);
        let mut left = FlowAccumulator::new(&a, &a, &a);
        let right = FlowAccumulator::new(&b, &a, &a);
        assert!(matches!(
            left.merge(&right),
            Err(SankeyError::IncompatibleAccumulators)
        ));
    }

    #[test]
    fn shared_labels_across_hops_combine() {
        // "Other" is both a location and an offense type but is one node.
        let location = dist(&[("Other", 1)]);
        let weapon = dist(&[("X", 1)]);
        let offense = dist(&[("Other", 1)]);
        let graph = aggregate(&[record(1, 10)], &location, &weapon, &offense);
        assert_eq!(graph.link_value("Other", "X"), Some(10));
        assert_eq!(graph.link_value("X", "Other"), Some(10));
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn rounds_half_to_even() {
        let location = dist(&[("A", 1), ("B", 1)]);
        let weapon = dist(&[("X", 1)]);
        let offense = dist(&[("F", 1)]);
        // 5 offenses split in half: 2.5 -> 2 on each location edge.
        let graph = aggregate(&[record(1, 5)], &location, &weapon, &offense);
        assert_eq!(graph.link_value("A", "X"), Some(2));
        assert_eq!(graph.link_value("B", "X"), Some(2));
        assert_eq!(graph.link_value("X", "F"), Some(5));
    }

    #[test]
    fn total_offenses_saturates() {
        let location = dist(&[("A", 1)]);
        let weapon = dist(&[("X", 1)]);
        let offense = dist(&[("F", 1)]);
        let graph = aggregate(
            &[record(1, i64::MAX), record(2, 1)],
            &location,
            &weapon,
            &offense,
        );
        assert_eq!(graph.total_offenses, i64::MAX);
        assert!(graph.link_value("A", "X").is_some());

        let mut left = FlowAccumulator::new(&location, &weapon, &offense);
        let mut right = FlowAccumulator::new(&location, &weapon, &offense);
        left.add_record(&record(1, i64::MAX));
        right.add_record(&record(2, i64::MAX));
        left.merge(&right).unwrap();
        assert_eq!(left.total_offenses(), i64::MAX);
    }

    #[test]
    fn running_totals() {
        let a = dist(&[("A", 1)]);
        let mut acc = FlowAccumulator::new(&a, &a, &a);
        acc.add_record(&record(1, 7));
        acc.add_record(&record(2, 0));
        assert_eq!(acc.records(), 2);
        assert_eq!(acc.total_offenses(), 7);
    }
}
