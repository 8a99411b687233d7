//! Human-readable summaries of a prune run.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::rewrite::PruneOutcome;
use crate::triplet::FontTriplet;

/// Placeholder row for an empty list.
pub const NONE_ROW: &str = "(none)";

/// Render triplets as `family | weight | style` rows, deduplicated.
///
/// Rows are ordered by the `family||weight||style` key, so `Foo-X` sorts
/// before `Foo`.
pub fn triplet_rows<'a>(triplets: impl IntoIterator<Item = &'a FontTriplet>) -> Vec<String> {
    let mut keyed: Vec<(String, &FontTriplet)> = triplets
        .into_iter()
        .map(|t| (format!("{}||{}||{}", t.family, t.weight, t.style), t))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    keyed.into_iter().map(|(_, t)| t.to_string()).collect()
}

/// One entry of the `.fonts.log` file.
///
/// ```text
/// === RUN 2024-05-01T10:00:00+02:00 ===
/// HTML file: newsletter.html
///
/// Used variants (family | weight | style):
///   - Foo | 700 | normal
///
/// Unused variants (removed @font-face):
///   (none)
/// ```
pub fn render_log_entry(input_name: &str, outcome: &PruneOutcome, at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== RUN {} ===", at.format("%Y-%m-%dT%H:%M:%S%:z"));
    let _ = writeln!(out, "HTML file: {input_name}");
    out.push('\n');

    out.push_str("Used variants (family | weight | style):\n");
    push_rows(&mut out, &triplet_rows(&outcome.used));
    out.push('\n');

    out.push_str("Unused variants (removed @font-face):\n");
    push_rows(&mut out, &triplet_rows(&outcome.removed));
    out.push_str("\n\n");

    out
}

fn push_rows(out: &mut String, rows: &[String]) {
    if rows.is_empty() {
        let _ = writeln!(out, "  {NONE_ROW}");
        return;
    }
    for row in rows {
        let _ = writeln!(out, "  - {row}");
    }
}
