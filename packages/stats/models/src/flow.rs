//! Node/link flow graph consumed by Sankey renderers.

use serde::{Deserialize, Serialize};

/// A node in the flow graph, identified by its category label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlowNode {
    /// Category label (a location, weapon, or offense type).
    pub id: String,
}

/// A finalized, integer-weighted edge between two category labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLink {
    /// Upstream label.
    pub source: String,
    /// Downstream label.
    pub target: String,
    /// Accumulated flow, rounded to the nearest integer.
    pub value: u64,
}

/// Aggregated location → weapon → offense flow across a set of
/// state-month records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    /// Every label participating in at least one link, sorted ascending.
    pub nodes: Vec<FlowNode>,
    /// Links in the order their (source, target) pair was first observed.
    pub links: Vec<FlowLink>,
    /// Sum of `offenses` over every input record.
    pub total_offenses: i64,
}

impl FlowGraph {
    /// Looks up the value of the link from `source` to `target`.
    #[must_use]
    pub fn link_value(&self, source: &str, target: &str) -> Option<u64> {
        self.links
            .iter()
            .find(|l| l.source == source && l.target == target)
            .map(|l| l.value)
    }
}
