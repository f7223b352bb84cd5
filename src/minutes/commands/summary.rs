use crate::error::Result;
use crate::index::{sort_by_date, IndexStore, SortOrder};
use crate::model::{Document, FIELD_DATE, FIELD_NAME, FIELD_PEOPLE, FIELD_TAGS};
use crate::render::{write_field, write_heading};
use std::io::Write;

/// Fields shown on one line even when they hold several values.
const COMPACT_FIELDS: [&str; 2] = [FIELD_PEOPLE, FIELD_TAGS];

/// Write every meeting, newest first, followed by all of its fields except
/// `name` and `date`. Returns the number of meetings written.
pub fn run<W: Write>(store: &IndexStore, out: &mut W) -> Result<usize> {
    let docs: Vec<&Document> = store.documents().iter().collect();
    let sorted = sort_by_date(&docs, SortOrder::Descending)?;
    let headings = sorted
        .iter()
        .map(|doc| -> Result<String> { Ok(format!("{} @ {}", doc.name()?, doc.date()?)) })
        .collect::<Result<Vec<_>>>()?;

    write_heading(out, 1, "Meeting summaries")?;
    for (doc, heading) in sorted.iter().zip(&headings) {
        write_heading(out, 2, heading)?;
        for (key, value) in doc.metadata.iter() {
            if key == FIELD_NAME || key == FIELD_DATE {
                continue;
            }
            write_field(out, key, value, COMPACT_FIELDS.contains(&key))?;
        }
    }
    Ok(sorted.len())
}
