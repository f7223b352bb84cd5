//! # State Storage
//!
//! The only state that outlives a run is the set of follow-up keys already appended
//! to the task list. The [`StateStore`] trait hides where that set lives so the
//! engine never touches a hardcoded path, and tests can swap in memory storage.
//!
//! ## Implementations
//!
//! - [`fs::FileStateStore`]: JSON array of keys on disk, written atomically.
//! - [`memory::InMemoryStateStore`]: For testing logic without filesystem I/O.
//!
//! ## Failure Semantics
//!
//! Implementations report every failure. Deciding what a failed load means is the
//! caller's job: [`MinutesApi`](crate::api::MinutesApi) degrades a failed load to an
//! empty set (every follow-up is re-emitted once) and treats a failed save as fatal.
//!
//! ## Storage Format
//!
//! ```json
//! ["meetings/2024/01-sync.md", "meetings/2024/02-planning.md"]
//! ```
//!
//! Keys are written sorted so the file diffs cleanly between runs.

use std::collections::BTreeSet;

use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait StateStore {
    /// Load the emitted follow-up keys. A store that has never been saved
    /// returns an empty set.
    fn load(&self) -> Result<BTreeSet<String>>;

    /// Replace the persisted keys with `keys`.
    fn save(&self, keys: &BTreeSet<String>) -> Result<()>;
}
