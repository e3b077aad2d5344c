//! Critical path rendering and golden-reference comparison.

use crate::critical_path::CriticalPath;
use crate::models::Activity;

/// Render a computed path in the reference format: the activity ids joined
/// by single spaces on one line, the total duration on the next.
pub fn render(path: &CriticalPath<'_, Activity>) -> String {
    let ids: Vec<&str> = path.nodes.iter().map(|a| a.id.as_str()).collect();
    format!("{}\n{}", ids.join(" "), path.total_weight)
}

/// Compare a rendering against golden reference text.
///
/// Tolerant of leading/trailing whitespace and CRLF line endings on either
/// side, so a checked-in reference file edited on any platform compares
/// equal.
pub fn matches_golden(actual: &str, expected: &str) -> bool {
    normalize(actual) == normalize(expected)
}

fn normalize(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(|l| l.trim_end().to_string())
        .collect()
}
