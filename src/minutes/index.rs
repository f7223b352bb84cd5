//! # Index Store
//!
//! The in-memory accumulation engine. Every document of a run is inserted once; the
//! store keeps the full collection plus two groupings (by person, by tag) and the
//! set of follow-up keys that have already been written to the task list.
//!
//! ## Groupings
//!
//! A grouping maps a key to the documents that mention it. Keys iterate in the
//! order they were first seen, documents in the order they were inserted:
//!
//! ```text
//! insert(A people=[Alice])          Alice -> [A]
//! insert(B people=[Alice, Bob])     Alice -> [A, B], Bob -> [B]
//! insert(C people=[Bob, Bob])       Bob   -> [B, C, C]
//! ```
//!
//! Repeated values are not collapsed: a document is listed once per occurrence.
//! Groupings hold positions into the document list rather than copies.
//!
//! ## Emitted Keys
//!
//! The emitted set only ever grows while the store is alive. It is seeded from the
//! [`StateStore`](crate::store::StateStore) before insertion and handed back for
//! saving once the follow-up digest has run. What goes into the set depends on
//! [`FollowupTracking`].

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh64::Xxh64;

use crate::error::Result;
use crate::model::{Document, FIELD_FOLLOWUP, FIELD_PEOPLE, FIELD_TAGS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent first.
    #[default]
    Descending,
    /// Oldest first.
    Ascending,
}

/// Which grouping a grouped report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    People,
    Tags,
}

impl GroupKind {
    pub fn label(&self) -> &'static str {
        match self {
            GroupKind::People => "People",
            GroupKind::Tags => "Tags",
        }
    }
}

/// How a document's follow-ups are identified in the emitted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FollowupTracking {
    /// Keyed by document identity. Once emitted, later edits to the follow-up list
    /// are never surfaced.
    #[default]
    Document,
    /// Keyed by identity plus a hash of the follow-up items. Editing the list
    /// re-emits the whole list once.
    Content,
}

impl TryFrom<String> for FollowupTracking {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(FollowupTracking::Document),
            "content" => Ok(FollowupTracking::Content),
            other => Err(format!(
                "unknown follow-up tracking '{}', expected 'document' or 'content'",
                other
            )),
        }
    }
}

/// Key -> document positions, keys in first-seen order.
#[derive(Debug, Default)]
pub struct Grouping {
    keys: Vec<String>,
    slots: HashMap<String, usize>,
    members: Vec<Vec<usize>>,
}

impl Grouping {
    fn push(&mut self, key: &str, position: usize) {
        let slot = match self.slots.get(key) {
            Some(slot) => *slot,
            None => {
                self.keys.push(key.to_string());
                self.members.push(Vec::new());
                let slot = self.keys.len() - 1;
                self.slots.insert(key.to_string(), slot);
                slot
            }
        };
        self.members[slot].push(position);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn positions(&self, key: &str) -> &[usize] {
        self.slots
            .get(key)
            .map(|slot| self.members[*slot].as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Default)]
pub struct IndexStore {
    documents: Vec<Document>,
    by_person: Grouping,
    by_tag: Grouping,
    emitted: BTreeSet<String>,
    tracking: FollowupTracking,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from follow-up keys persisted by earlier runs.
    pub fn with_emitted(emitted: BTreeSet<String>) -> Self {
        Self {
            emitted,
            ..Self::default()
        }
    }

    pub fn with_tracking(mut self, tracking: FollowupTracking) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn insert(&mut self, document: Document) {
        let position = self.documents.len();
        for person in document.field(FIELD_PEOPLE).values() {
            self.by_person.push(person, position);
        }
        for tag in document.field(FIELD_TAGS).values() {
            self.by_tag.push(tag, position);
        }
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn grouping(&self, kind: GroupKind) -> &Grouping {
        match kind {
            GroupKind::People => &self.by_person,
            GroupKind::Tags => &self.by_tag,
        }
    }

    /// Documents filed under `key`, in insertion order.
    pub fn group(&self, kind: GroupKind, key: &str) -> Vec<&Document> {
        self.grouping(kind)
            .positions(key)
            .iter()
            .map(|p| &self.documents[*p])
            .collect()
    }

    pub fn tracking(&self) -> FollowupTracking {
        self.tracking
    }

    /// Key under which `document`'s follow-ups are recorded.
    pub fn followup_key(&self, document: &Document) -> String {
        match self.tracking {
            FollowupTracking::Document => document.identity.clone(),
            FollowupTracking::Content => {
                let mut hasher = Xxh64::new(0);
                // Length-prefixed so ["a\nb"] and ["a", "b"] hash apart.
                for item in document.field(FIELD_FOLLOWUP).values() {
                    hasher.update(&(item.len() as u64).to_le_bytes());
                    hasher.update(item.as_bytes());
                }
                format!("{}#{:016x}", document.identity, hasher.digest())
            }
        }
    }

    pub fn is_emitted(&self, key: &str) -> bool {
        self.emitted.contains(key)
    }

    pub fn mark_emitted(&mut self, key: String) {
        self.emitted.insert(key);
    }

    pub fn emitted(&self) -> &BTreeSet<String> {
        &self.emitted
    }
}

/// Sort documents by their `date` field.
///
/// The sort is stable in both directions: documents sharing a date keep their
/// input order. Fails on the first document without a date.
pub fn sort_by_date<'a>(
    documents: &[&'a Document],
    order: SortOrder,
) -> Result<Vec<&'a Document>> {
    let mut keyed = documents
        .iter()
        .map(|doc| doc.date().map(|date| (date, *doc)))
        .collect::<Result<Vec<_>>>()?;

    match order {
        SortOrder::Ascending => keyed.sort_by(|a, b| a.0.cmp(b.0)),
        SortOrder::Descending => keyed.sort_by(|a, b| b.0.cmp(a.0)),
    }

    Ok(keyed.into_iter().map(|(_, doc)| doc).collect())
}
