//! # API Facade
//!
//! The API layer is a **thin facade** over the report layer and the single entry
//! point for a run, whatever the front end.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Seeds** the [`IndexStore`] from the [`StateStore`], degrading a failed load
//!   to an empty set with a warning
//! - **Dispatches** to the report functions in `commands/*.rs`
//! - **Owns the files**: index and summary files are rewritten, the task list is
//!   only ever appended to
//! - **Persists** the emitted keys, treating a failed save as fatal
//!
//! ## Run Order
//!
//! ```text
//! load state -> discover notes -> insert all -> render people, tags, summary
//!            -> write index files -> append follow-ups -> save state
//! ```
//!
//! The follow-up digest alone ([`MinutesApi::followups`]) runs the last two steps
//! without writing index files. Either way an emitted key is only saved after its
//! items reached the task list.
//!
//! All three index reports are rendered in memory before any file is touched, so a
//! note with a missing `name` or `date` leaves the previous outputs intact.
//!
//! If the process dies between appending follow-ups and saving state, the next run
//! appends the same follow-ups again. Saving before appending would instead risk
//! losing them, which is worse for a task list.
//!
//! ## Generic Over StateStore
//!
//! - Production: `MinutesApi<FileStateStore>`
//! - Testing: `MinutesApi<InMemoryStateStore>`

use crate::commands::{self, followups::PendingFollowups, CmdMessage, CmdResult};
use crate::config::MinutesConfig;
use crate::error::{MinutesError, Result};
use crate::index::{GroupKind, IndexStore};
use crate::model::Document;
use crate::source;
use crate::store::StateStore;
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct MinutesApi<S: StateStore> {
    state: S,
    config: MinutesConfig,
}

impl<S: StateStore> MinutesApi<S> {
    pub fn new(state: S, config: MinutesConfig) -> Self {
        Self { state, config }
    }

    pub fn config(&self) -> &MinutesConfig {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Parsed notes under the configured notes directory.
    pub fn load_documents(&self) -> Result<Vec<Document>> {
        source::load_documents(&self.config.notes_dir, &self.config.extensions)
    }

    /// Build a populated store seeded with the persisted follow-up keys.
    pub fn build_index(&self, documents: Vec<Document>) -> IndexStore {
        self.seed_index(documents).0
    }

    /// Like [`build_index`](Self::build_index), also handing back the warning
    /// raised when the persisted keys could not be loaded.
    fn seed_index(&self, documents: Vec<Document>) -> (IndexStore, Option<CmdMessage>) {
        let (emitted, warning) = self.load_emitted();
        let mut store =
            IndexStore::with_emitted(emitted).with_tracking(self.config.followup_tracking);
        for document in documents {
            store.insert(document);
        }
        log::debug!("Indexed {} documents", store.len());
        (store, warning)
    }

    fn load_emitted(&self) -> (BTreeSet<String>, Option<CmdMessage>) {
        match self.state.load() {
            Ok(keys) => (keys, None),
            Err(e) => {
                log::warn!(
                    "Could not load follow-up state ({}); previously emitted follow-ups will be emitted again",
                    e
                );
                let warning = CmdMessage::warning(format!(
                    "Could not load follow-up state from {}; all follow-ups are treated as new",
                    self.config.state_file.display()
                ));
                (BTreeSet::new(), Some(warning))
            }
        }
    }

    /// Persisted keys, failing loudly instead of degrading.
    pub fn emitted_keys(&self) -> Result<BTreeSet<String>> {
        self.state.load()
    }

    pub fn write_grouped_index<W: Write>(
        &self,
        store: &IndexStore,
        kind: GroupKind,
        out: &mut W,
    ) -> Result<usize> {
        commands::grouped::run(store, kind, out)
    }

    pub fn write_summary<W: Write>(&self, store: &IndexStore, out: &mut W) -> Result<usize> {
        commands::summary::run(store, out)
    }

    pub fn pending_followups(&self, store: &IndexStore) -> Result<Vec<PendingFollowups>> {
        commands::followups::pending(store)
    }

    pub fn write_followups<W: Write>(
        &self,
        store: &mut IndexStore,
        out: &mut W,
    ) -> Result<Vec<String>> {
        commands::followups::run(store, out)
    }

    pub fn save_state(&self, store: &IndexStore) -> Result<()> {
        self.state.save(store.emitted())
    }

    /// Append follow-ups not yet emitted to the task list and mark them in `store`.
    /// The task list is left alone when there is nothing new.
    pub fn append_followups(&self, store: &mut IndexStore) -> Result<Vec<String>> {
        let mut digest = Vec::new();
        let items = self.write_followups(store, &mut digest)?;
        if !items.is_empty() {
            let tasks = &self.config.tasks_file;
            append_file(tasks, &digest)?;
            log::info!("Appended {} follow-ups to {}", items.len(), tasks.display());
        }
        Ok(items)
    }

    /// Full pipeline against the configured files.
    pub fn run(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        let (mut store, warning) = self.seed_index(self.load_documents()?);
        result.messages.extend(warning);

        let mut people = Vec::new();
        let mut tags = Vec::new();
        let mut summary = Vec::new();
        self.write_grouped_index(&store, GroupKind::People, &mut people)?;
        self.write_grouped_index(&store, GroupKind::Tags, &mut tags)?;
        let meetings = self.write_summary(&store, &mut summary)?;

        result.add_message(CmdMessage::info(format!("Indexed {} meetings", meetings)));

        for (path, content) in [
            (self.config.people_index_path(), people),
            (self.config.tags_index_path(), tags),
            (self.config.summary_path(), summary),
        ] {
            write_file(&path, &content)?;
            log::info!("Wrote {}", path.display());
            result.add_message(CmdMessage::info(format!("Wrote {}", path.display())));
            result.written.push(path);
        }

        self.finish_followups(&mut store, result)
    }

    /// Follow-up digest only: append to the task list and save state, leaving the
    /// index files untouched.
    pub fn followups(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        let (mut store, warning) = self.seed_index(self.load_documents()?);
        result.messages.extend(warning);
        self.finish_followups(&mut store, result)
    }

    fn finish_followups(
        &self,
        store: &mut IndexStore,
        mut result: CmdResult,
    ) -> Result<CmdResult> {
        let items = self.append_followups(store)?;
        if items.is_empty() {
            result.add_message(CmdMessage::info("No new follow-ups"));
        } else {
            let tasks = &self.config.tasks_file;
            result.add_message(CmdMessage::success(format!(
                "Appended {} follow-ups to {}",
                items.len(),
                tasks.display()
            )));
            result.written.push(tasks.clone());
        }

        self.save_state(store)?;
        Ok(result.with_followups(items))
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(MinutesError::Io)?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(MinutesError::Io)
}

fn append_file(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(MinutesError::Io)?;
    file.write_all(content).map_err(MinutesError::Io)
}
