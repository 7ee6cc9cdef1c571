//! Plain text rendering for outlines.

use std::fmt::Write;

use crate::model::DocumentOutline;

/// Render an outline as an indented list, one heading per line.
///
/// Each line carries the level and 0-indexed page, e.g. `  H2 Setup (p. 3)`.
pub fn outline_to_text(outline: &DocumentOutline) -> String {
    let mut output = String::new();

    if !outline.title.is_empty() {
        let _ = writeln!(output, "{}", outline.title);
        let _ = writeln!(output);
    }

    for entry in &outline.outline {
        let indent = "  ".repeat(entry.level.depth().saturating_sub(1) as usize);
        let _ = writeln!(output, "{}{} {} (p. {})", indent, entry.level, entry.text, entry.page);
    }

    output.trim_end().to_string()
}
