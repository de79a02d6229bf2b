//! Output writers for the flow graph and the demographic count tables.

use std::io::Write as _;
use std::path::Path;

use crime_stats_distributions::DistributionTable;
use crime_stats_models::FlowGraph;
use crime_stats_models::io::write_atomic;

use crate::SankeyError;

/// Writes `graph` as pretty-printed JSON (`nodes`, `links`,
/// `total_offenses`).
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_flow_graph(path: &Path, graph: &FlowGraph) -> Result<(), SankeyError> {
    write_atomic::<SankeyError, _>(path, |out| {
        serde_json::to_writer_pretty(&mut *out, graph)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;
    log::info!(
        "Wrote {} node(s) and {} link(s) to {}",
        graph.nodes.len(),
        graph.links.len(),
        path.display()
    );
    Ok(())
}

/// Writes a two-column `<category>,count` CSV with one row per label, in
/// table order.
///
/// The counts are the table's literal values; they do not depend on any
/// state-month input.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_category_counts(path: &Path, table: &DistributionTable) -> Result<(), SankeyError> {
    write_atomic::<SankeyError, _>(path, |out| {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record([table.category().as_ref(), "count"])?;
        for (label, count) in table.iter() {
            writer.write_record([label, count.to_string().as_str()])?;
        }
        writer.flush()?;
        Ok(())
    })?;
    log::info!(
        "Wrote {} {} row(s) to {}",
        table.len(),
        table.category(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crime_stats_distributions::{Category, DistributionSet};
    use crime_stats_models::{FlowLink, FlowNode};

    use super::*;

    #[test]
    fn flow_graph_file_is_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sankey.json");
        let graph = FlowGraph {
            nodes: vec![FlowNode { id: "A".to_string() }],
            links: vec![FlowLink {
                source: "A".to_string(),
                target: "A".to_string(),
                value: 3,
            }],
            total_offenses: 3,
        };
        write_flow_graph(&path, &graph).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"nodes\": ["));
        let parsed: FlowGraph = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn age_table_rows_in_configured_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("age.csv");
        write_category_counts(&path, &DistributionSet::builtin().age).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "age,count");
        assert_eq!(lines[1], "20-29,804232");
        assert_eq!(lines[11], "90-Older,2193");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn sex_table_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sex.csv");
        let table = DistributionTable::from_static(Category::Sex, &[("Male", 2), ("Female", 1)]);
        write_category_counts(&path, &table).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "sex,count\nMale,2\nFemale,1\n"
        );
    }
}
