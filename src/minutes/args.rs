use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minutes", version)]
#[command(about = "Index meeting notes and collect their follow-ups", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./minutes.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory of the meeting notes
    #[arg(long, global = true)]
    pub notes_dir: Option<PathBuf>,

    /// Directory for the generated index files
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Task list that new follow-ups are appended to
    #[arg(long, global = true)]
    pub tasks_file: Option<PathBuf>,

    /// File recording which follow-ups were already emitted
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild all indexes and append new follow-ups (default)
    Run,

    /// Print the chronological summary
    Summary,

    /// Print the people or tag index
    Index {
        #[arg(value_enum)]
        kind: IndexKind,
    },

    /// Append new follow-ups to the task list and mark them as emitted
    Followups {
        /// Show what would be appended without touching the task list or state
        #[arg(long)]
        dry_run: bool,
    },

    /// List the follow-up keys already emitted
    State,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    People,
    Tags,
}
