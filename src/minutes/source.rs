//! Discovery of meeting notes on disk.
//!
//! Walks the notes root recursively, in file-name order so runs are reproducible,
//! and parses the front matter of every file with a matching extension. A file's
//! identity is its path as reached from the root (`meetings/2024/01-sync.md`),
//! always `/`-separated so persisted follow-up keys survive a platform change.
//! Hidden files and directories below the root are not descended into.

use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::frontmatter;
use crate::model::{Document, Metadata};

/// A discovered file and its metadata, if it has any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub identity: String,
    pub metadata: Option<Metadata>,
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Dot-prefixed files and directories (`.trash/`, `.#draft.md`) are never notes.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn identity_of(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Read and parse one file. Unreadable files and broken headers are reported and
/// treated as carrying no metadata.
fn read_metadata(path: &Path) -> Option<Metadata> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };
    match frontmatter::parse(&content) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Every file under `root` with one of `extensions`, metadata or not.
pub fn discover(root: &Path, extensions: &[String]) -> Result<Vec<SourceEntry>> {
    if !root.exists() {
        log::warn!("Notes directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        log::debug!("Processing file: {}", entry.path().display());
        entries.push(SourceEntry {
            identity: identity_of(entry.path()),
            metadata: read_metadata(entry.path()),
        });
    }
    Ok(entries)
}

/// Documents ready for indexing: entries without metadata are dropped.
pub fn load_documents(root: &Path, extensions: &[String]) -> Result<Vec<Document>> {
    Ok(discover(root, extensions)?
        .into_iter()
        .filter_map(|entry| {
            let metadata = entry.metadata?;
            Some(Document::new(entry.identity, metadata))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn md() -> Vec<String> {
        vec!["md".to_string()]
    }

    #[test]
    fn test_discovers_nested_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", "---\nname: B\n---\n");
        write(dir.path(), "2024/a.md", "---\nname: A\n---\n");
        write(dir.path(), "notes.txt", "---\nname: T\n---\n");

        let entries = discover(dir.path(), &md()).unwrap();
        let names: Vec<&str> = entries
            .iter()
            .map(|e| e.identity.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
        assert!(entries[0].identity.ends_with("2024/a.md"));
    }

    #[test]
    fn test_files_without_front_matter_are_dropped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "plain.md", "# just a body\n");
        write(dir.path(), "meeting.md", "---\nname: Sync\n---\nbody");

        assert_eq!(discover(dir.path(), &md()).unwrap().len(), 2);
        let docs = load_documents(dir.path(), &md()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].field("name"), &FieldValue::scalar("Sync"));
    }

    #[test]
    fn test_broken_yaml_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.md", "---\npeople: [Alice\n---\n");
        let entries = discover(dir.path(), &md()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].metadata.is_none());
    }

    #[test]
    fn test_extension_match_ignores_dot_and_case() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.MD", "---\nname: A\n---\n");
        write(dir.path(), "b.markdown", "---\nname: B\n---\n");

        let exts = vec![".md".to_string(), "markdown".to_string()];
        assert_eq!(load_documents(dir.path(), &exts).unwrap().len(), 2);
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".trash/old.md", "---\nname: Old\n---\n");
        write(dir.path(), ".#draft.md", "---\nname: Draft\n---\n");
        write(dir.path(), "2024/sync.md", "---\nname: Sync\n---\n");

        let docs = load_documents(dir.path(), &md()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].identity.ends_with("2024/sync.md"));
    }

    #[test]
    fn test_hidden_root_is_still_walked() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".notes/a.md", "---\nname: A\n---\n");
        let docs = load_documents(&dir.path().join(".notes"), &md()).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let docs = load_documents(&dir.path().join("nope"), &md()).unwrap();
        assert!(docs.is_empty());
    }
}
