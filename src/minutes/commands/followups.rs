use crate::error::Result;
use crate::index::{sort_by_date, IndexStore, SortOrder};
use crate::model::{Document, FIELD_FOLLOWUP};
use crate::render::{task_line, write_heading};
use std::io::Write;

/// Follow-ups of one document that have not been emitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFollowups {
    pub key: String,
    pub identity: String,
    pub items: Vec<String>,
}

/// Collect pending follow-ups, oldest meeting first, without touching the store.
///
/// Documents without follow-ups are skipped and never marked, so they are simply
/// re-checked on the next run.
pub fn pending(store: &IndexStore) -> Result<Vec<PendingFollowups>> {
    let docs: Vec<&Document> = store.documents().iter().collect();
    let mut found = Vec::new();
    for doc in sort_by_date(&docs, SortOrder::Ascending)? {
        let items = doc.field(FIELD_FOLLOWUP).values();
        if items.is_empty() {
            continue;
        }
        let key = store.followup_key(doc);
        if store.is_emitted(&key) {
            continue;
        }
        found.push(PendingFollowups {
            key,
            identity: doc.identity.clone(),
            items: items.to_vec(),
        });
    }
    Ok(found)
}

/// Write pending follow-ups as unchecked tasks. Nothing is written when there is
/// nothing new, keeping the append-only task list free of empty sections.
pub fn write<W: Write>(pending: &[PendingFollowups], out: &mut W) -> Result<Vec<String>> {
    let items: Vec<String> = pending.iter().flat_map(|p| p.items.clone()).collect();
    if items.is_empty() {
        return Ok(items);
    }

    write_heading(out, 1, "New followup items")?;
    for item in &items {
        writeln!(out, "{}", task_line(item))?;
    }
    writeln!(out)?;
    Ok(items)
}

/// Emit every pending follow-up and mark its document as emitted.
/// Returns the emitted items in output order.
pub fn run<W: Write>(store: &mut IndexStore, out: &mut W) -> Result<Vec<String>> {
    let found = pending(store)?;
    let items = write(&found, out)?;
    for p in found {
        log::debug!("Marking follow-ups of {} as emitted", p.identity);
        store.mark_emitted(p.key);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FollowupTracking;
    use crate::model::{FieldValue, Metadata};

    fn meeting(identity: &str, date: &str, followup: FieldValue) -> Document {
        Document::new(
            identity,
            Metadata::new()
                .with("name", FieldValue::scalar(identity))
                .with("date", FieldValue::scalar(date))
                .with("followup", followup),
        )
    }

    fn emit(store: &mut IndexStore) -> String {
        let mut out = Vec::new();
        run(store, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_oldest_first_then_idempotent() {
        let mut store = IndexStore::new();
        store.insert(meeting(
            "b.md",
            "2024-02-01",
            FieldValue::sequence(["task1", "task2"]),
        ));
        store.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("fix X")));

        let first = emit(&mut store);
        assert_eq!(
            first,
            "\n# New followup items\n\n- [ ] fix X\n- [ ] task1\n- [ ] task2\n\n"
        );
        assert!(store.is_emitted("a.md"));
        assert!(store.is_emitted("b.md"));

        assert_eq!(emit(&mut store), "");
    }

    #[test]
    fn test_seeded_keys_are_skipped() {
        let seed = ["a.md".to_string()].into_iter().collect();
        let mut store = IndexStore::with_emitted(seed);
        store.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("old")));
        store.insert(meeting("b.md", "2024-01-02", FieldValue::scalar("new")));

        let mut out = Vec::new();
        let items = run(&mut store, &mut out).unwrap();
        assert_eq!(items, vec!["new"]);
    }

    #[test]
    fn test_documents_without_followups_are_not_marked() {
        let mut store = IndexStore::new();
        store.insert(meeting("quiet.md", "2024-01-01", FieldValue::Absent));
        store.insert(meeting("empty.md", "2024-01-01", FieldValue::Sequence(vec![])));

        assert_eq!(emit(&mut store), "");
        assert!(store.emitted().is_empty());
    }

    #[test]
    fn test_edited_followups_stay_silent_by_document() {
        let mut store = IndexStore::with_emitted(["a.md".to_string()].into_iter().collect());
        store.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("added later")));
        assert_eq!(emit(&mut store), "");
    }

    #[test]
    fn test_edited_followups_resurface_by_content() {
        let mut first = IndexStore::new().with_tracking(FollowupTracking::Content);
        first.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("fix X")));
        emit(&mut first);
        let seed = first.emitted().clone();

        let mut unchanged = IndexStore::with_emitted(seed.clone())
            .with_tracking(FollowupTracking::Content);
        unchanged.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("fix X")));
        assert_eq!(emit(&mut unchanged), "");

        let mut edited = IndexStore::with_emitted(seed).with_tracking(FollowupTracking::Content);
        edited.insert(meeting(
            "a.md",
            "2024-01-01",
            FieldValue::sequence(["fix X", "fix Y"]),
        ));
        assert!(emit(&mut edited).contains("- [ ] fix Y"));
    }

    #[test]
    fn test_pending_does_not_mark() {
        let mut store = IndexStore::new();
        store.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("fix X")));
        let found = pending(&store).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].items, vec!["fix X"]);
        assert!(!store.is_emitted("a.md"));
    }

    #[test]
    fn test_missing_date_marks_nothing() {
        let mut store = IndexStore::new();
        store.insert(meeting("a.md", "2024-01-01", FieldValue::scalar("fix X")));
        store.insert(Document::new(
            "undated.md",
            Metadata::new().with("followup", FieldValue::scalar("y")),
        ));

        let mut out = Vec::new();
        assert!(run(&mut store, &mut out).is_err());
        assert!(out.is_empty());
        assert!(store.emitted().is_empty());
    }
}
