use super::StateStore;
use crate::error::{MinutesError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(MinutesError::Io)?;
        }
        Ok(parent)
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<BTreeSet<String>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }
        let content = fs::read_to_string(&self.path).map_err(MinutesError::Io)?;
        let keys: Vec<String> =
            serde_json::from_str(&content).map_err(MinutesError::Serialization)?;
        Ok(keys.into_iter().collect())
    }

    fn save(&self, keys: &BTreeSet<String>) -> Result<()> {
        let parent = self.ensure_parent()?;
        let content = serde_json::to_string_pretty(keys).map_err(MinutesError::Serialization)?;

        // Atomic write
        let tmp_file = parent.join(format!(".minutes-state-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(MinutesError::Io)?;
        fs::rename(&tmp_file, &self.path).map_err(MinutesError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("state.cache"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("nested/state.cache"));
        let saved = keys(&["b.md", "a.md"]);

        store.save(&saved).unwrap();

        assert_eq!(store.load().unwrap(), saved);
    }

    #[test]
    fn test_save_writes_sorted_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.cache");
        let store = FileStateStore::new(&path);

        store.save(&keys(&["z.md", "a.md"])).unwrap();

        let on_disk: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec!["a.md", "z.md"]);
    }

    #[test]
    fn test_reads_legacy_unsorted_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.cache");
        fs::write(&path, r#"["meetings/b.md", "meetings/a.md"]"#).unwrap();

        let loaded = FileStateStore::new(&path).load().unwrap();
        assert_eq!(loaded, keys(&["meetings/a.md", "meetings/b.md"]));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.cache");
        fs::write(&path, "not json").unwrap();

        let err = FileStateStore::new(&path).load().unwrap_err();
        assert!(matches!(err, MinutesError::Serialization(_)));
    }

    #[test]
    fn test_no_tmp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("state.cache"));
        store.save(&keys(&["a.md"])).unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }
}
