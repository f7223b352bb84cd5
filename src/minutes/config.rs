//! # Configuration
//!
//! Minutes configuration is managed by [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Command-line flags**: `--notes-dir`, `--state-file`, etc. (applied by the CLI).
//! 2. **Environment variables**: `MINUTES_NOTES_DIR`, `MINUTES_FOLLOWUP_TRACKING`, etc.
//! 3. **Config file**: `minutes.toml` in the working directory, or `--config <path>`.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `notes_dir` | `meetings` | Root of the meeting-note tree |
//! | `index_dir` | `meetings_index` | Where `ix_people.md`, `ix_tags.md`, `ix_summary.md` go |
//! | `tasks_file` | `tasks/meeting_tasks.md` | Append-only follow-up list |
//! | `state_file` | `meetings_index/actionItemProcessedPosts.cache` | Emitted follow-up keys |
//! | `extensions` | `["md"]` | Note file extensions |
//! | `followup_tracking` | `document` | `document` or `content` |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::index::FollowupTracking;

pub const CONFIG_FILENAME: &str = "minutes.toml";

pub const PEOPLE_INDEX_FILE: &str = "ix_people.md";
pub const TAGS_INDEX_FILE: &str = "ix_tags.md";
pub const SUMMARY_FILE: &str = "ix_summary.md";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MinutesConfig {
    /// Root directory scanned for meeting notes.
    #[config(env = "MINUTES_NOTES_DIR", default = "meetings")]
    pub notes_dir: PathBuf,

    /// Directory receiving the generated index files.
    #[config(env = "MINUTES_INDEX_DIR", default = "meetings_index")]
    pub index_dir: PathBuf,

    /// Task list that new follow-ups are appended to.
    #[config(env = "MINUTES_TASKS_FILE", default = "tasks/meeting_tasks.md")]
    pub tasks_file: PathBuf,

    /// File holding the keys of already-emitted follow-ups.
    #[config(
        env = "MINUTES_STATE_FILE",
        default = "meetings_index/actionItemProcessedPosts.cache"
    )]
    pub state_file: PathBuf,

    /// File extensions treated as meeting notes.
    #[config(default = ["md"])]
    pub extensions: Vec<String>,

    /// `document` marks a note once; `content` re-emits edited follow-up lists.
    #[config(env = "MINUTES_FOLLOWUP_TRACKING", default = "document")]
    pub followup_tracking: FollowupTracking,
}

impl Default for MinutesConfig {
    fn default() -> Self {
        Self {
            notes_dir: PathBuf::from("meetings"),
            index_dir: PathBuf::from("meetings_index"),
            tasks_file: PathBuf::from("tasks/meeting_tasks.md"),
            state_file: PathBuf::from("meetings_index/actionItemProcessedPosts.cache"),
            extensions: vec!["md".to_string()],
            followup_tracking: FollowupTracking::Document,
        }
    }
}

impl MinutesConfig {
    /// Load configuration from the environment and `file`, if it exists.
    pub fn load(file: &Path) -> Result<Self> {
        let config = MinutesConfig::builder().env().file(file).load()?;
        Ok(config)
    }

    pub fn people_index_path(&self) -> PathBuf {
        self.index_dir.join(PEOPLE_INDEX_FILE)
    }

    pub fn tags_index_path(&self) -> PathBuf {
        self.index_dir.join(TAGS_INDEX_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.index_dir.join(SUMMARY_FILE)
    }
}
