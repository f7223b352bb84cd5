//! Markdown line rendering shared by every report.
//!
//! Metadata values are printed as list items. A value with a single entry always
//! fits on one line; a longer sequence is either joined on one line (`compact`) or
//! expanded into nested bullets.

use std::io::{self, Write};

use crate::model::FieldValue;

/// Render one metadata field as zero or more lines (without trailing newlines).
pub fn field_lines(key: &str, value: &FieldValue, compact: bool) -> Vec<String> {
    match value.values() {
        [] => Vec::new(),
        [only] => vec![format!("- {}: {}", key, only)],
        many if compact => vec![format!("- {}: {}", key, many.join(", "))],
        many => {
            let mut lines = Vec::with_capacity(many.len() + 1);
            lines.push(format!("- {}:", key));
            lines.extend(many.iter().map(|v| format!("  - {}", v)));
            lines
        }
    }
}

pub fn write_field<W: Write>(
    out: &mut W,
    key: &str,
    value: &FieldValue,
    compact: bool,
) -> io::Result<()> {
    for line in field_lines(key, value, compact) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Section heading, surrounded by blank lines.
pub fn write_heading<W: Write>(out: &mut W, level: usize, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", "#".repeat(level), text)?;
    writeln!(out)
}

pub fn task_line(item: &str) -> String {
    format!("- [ ] {}", item)
}
