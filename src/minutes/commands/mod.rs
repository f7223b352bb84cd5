//! # Report Layer
//!
//! Each report is a single read pass over a populated
//! [`IndexStore`](crate::index::IndexStore), written to any [`std::io::Write`] sink.
//!
//! ## Role and Responsibilities
//!
//! - [`grouped`]: one section per person or tag, newest meeting first
//! - [`summary`]: every meeting, newest first, with all of its fields
//! - [`followups`]: follow-up items not yet emitted, oldest first. The only report
//!   that mutates the store, by marking the documents it emitted.
//!
//! ## What Reports Do NOT Do
//!
//! - **Open files**: the sink is passed in. Truncate-vs-append is the caller's call.
//! - **Persist state**: marking happens in memory; saving is
//!   [`MinutesApi::save_state`](crate::api::MinutesApi::save_state).
//! - **Recover from bad input**: a document missing `name` or `date` aborts the
//!   pass with the document named in the error.
//!
//! Reports validate everything they need before writing the first byte, so a
//! failed pass leaves the sink untouched.

use std::path::PathBuf;

pub mod followups;
pub mod grouped;
pub mod summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Files written during the run, in write order.
    pub written: Vec<PathBuf>,
    /// Follow-up items appended to the task list.
    pub followups: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_followups(mut self, followups: Vec<String>) -> Self {
        self.followups = followups;
        self
    }
}
