use crate::error::Result;
use crate::index::{sort_by_date, GroupKind, IndexStore, SortOrder};
use crate::render::write_heading;
use std::io::Write;

struct Section<'a> {
    key: &'a str,
    entries: Vec<(&'a str, &'a str)>,
}

/// Write the `kind` grouping as one section per key, newest meeting first.
/// Returns the number of sections written.
pub fn run<W: Write>(store: &IndexStore, kind: GroupKind, out: &mut W) -> Result<usize> {
    let mut sections = Vec::new();
    for key in store.grouping(kind).keys() {
        let docs = store.group(kind, key);
        let entries = sort_by_date(&docs, SortOrder::Descending)?
            .into_iter()
            .map(|doc| doc.name().map(|name| (name, doc.identity.as_str())))
            .collect::<Result<Vec<_>>>()?;
        sections.push(Section { key, entries });
    }

    write_heading(out, 1, &format!("{} index", kind.label()))?;
    for section in &sections {
        write_heading(out, 2, section.key)?;
        for (name, identity) in &section.entries {
            writeln!(out, "- {} - {}", name, identity)?;
        }
    }
    Ok(sections.len())
}
