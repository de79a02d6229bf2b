//! `crime_stats categories`: prints every distribution table.

use crime_stats_distributions::{Category, DistributionSet, normalize};

/// Writes every table in `set` to stdout in [`Category::all`] order.
pub fn print(set: &DistributionSet) {
    for category in Category::all() {
        print!("{}", render(set, *category));
    }
}

/// Formats one table as `label  count  probability` lines under a
/// heading with the table total.
fn render(set: &DistributionSet, category: Category) -> String {
    let table = set.get(category);
    let normalized = normalize(table);
    let width = table.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = format!(
        "{category} ({} label(s), total {})\n",
        table.len(),
        table.total()
    );
    for ((label, count), (_, p)) in table.iter().zip(normalized.iter()) {
        out.push_str(&format!("  {label:<width$}  {count:>9}  {p:.6}\n"));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counts_and_probabilities() {
        let text = render(DistributionSet::builtin(), Category::Sex);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("sex (4 label(s), total 3400339)"));
        let male = lines.next().unwrap();
        assert!(male.starts_with("  Male"), "{male}");
        assert!(male.contains("2265464"), "{male}");
        assert!(male.ends_with("0.666247"), "{male}");
    }

    #[test]
    fn zero_total_renders_zero_probabilities() {
        let set = DistributionSet::from_toml_str(
            "[[weapon]]\nlabel = \"None\"\ncount = 0\n",
        )
        .unwrap();
        let text = render(&set, Category::Weapon);
        assert!(text.contains("None          0  0.000000"), "{text}");
    }
}
