//! # Minutes Architecture
//!
//! Minutes turns a tree of meeting notes into browsable indexes and a running
//! follow-up list. It is a library that happens to have a CLI client: everything
//! from `api.rs` inward takes Rust values, returns `Result`, and writes only to the
//! sinks it is handed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses flags, loads config, prints messages              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Seeds the index from state, opens files, saves state     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Reports (commands/*.rs) over the Index Store (index.rs)    │
//! │  - Grouped index, summary, follow-up digest                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (store/)                                       │
//! │  - StateStore trait: FileStateStore, InMemoryStateStore     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Format
//!
//! ```text
//! ---
//! name: Infra sync
//! date: 2024-02-01
//! people: [Alice, Bob]
//! tags: [infra]
//! followup:
//!   - rotate the staging keys
//! ---
//! Free-form notes...
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for a run
//! - [`commands`]: Report generators
//! - [`index`]: The Index Store and date sorting
//! - [`model`]: `Document`, `Metadata`, `FieldValue`
//! - [`render`]: Markdown list rendering of metadata fields
//! - [`frontmatter`]: YAML header extraction
//! - [`source`]: Note discovery on disk
//! - [`store`]: Persistence of emitted follow-up keys
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod model;
pub mod render;
pub mod source;
pub mod store;
