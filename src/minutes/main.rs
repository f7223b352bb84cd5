use clap::Parser;
use colored::*;
use minutes::api::MinutesApi;
use minutes::commands::{CmdMessage, MessageLevel};
use minutes::config::{MinutesConfig, CONFIG_FILENAME};
use minutes::error::Result;
use minutes::index::GroupKind;
use minutes::render::task_line;
use minutes::store::fs::FileStateStore;
use std::io::{self, Write};
use std::path::PathBuf;

mod args;
use args::{Cli, Commands, IndexKind};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let api = init_api(&cli)?;

    match cli.command {
        None | Some(Commands::Run) => handle_run(&api),
        Some(Commands::Summary) => handle_summary(&api),
        Some(Commands::Index { kind }) => handle_index(&api, kind),
        Some(Commands::Followups { dry_run }) => handle_followups(&api, dry_run),
        Some(Commands::State) => handle_state(&api),
    }
}

fn init_api(cli: &Cli) -> Result<MinutesApi<FileStateStore>> {
    let config_file = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = MinutesConfig::load(&config_file)?;

    if let Some(dir) = &cli.notes_dir {
        config.notes_dir = dir.clone();
    }
    if let Some(dir) = &cli.index_dir {
        config.index_dir = dir.clone();
    }
    if let Some(file) = &cli.tasks_file {
        config.tasks_file = file.clone();
    }
    if let Some(file) = &cli.state_file {
        config.state_file = file.clone();
    }

    let state = FileStateStore::new(config.state_file.clone());
    Ok(MinutesApi::new(state, config))
}

fn handle_run(api: &MinutesApi<FileStateStore>) -> Result<()> {
    let result = api.run()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_summary(api: &MinutesApi<FileStateStore>) -> Result<()> {
    let store = api.build_index(api.load_documents()?);
    let mut out = Vec::new();
    api.write_summary(&store, &mut out)?;
    io::stdout().write_all(&out)?;
    Ok(())
}

fn handle_index(api: &MinutesApi<FileStateStore>, kind: IndexKind) -> Result<()> {
    let kind = match kind {
        IndexKind::People => GroupKind::People,
        IndexKind::Tags => GroupKind::Tags,
    };
    let store = api.build_index(api.load_documents()?);
    let mut out = Vec::new();
    api.write_grouped_index(&store, kind, &mut out)?;
    io::stdout().write_all(&out)?;
    Ok(())
}

fn handle_followups(api: &MinutesApi<FileStateStore>, dry_run: bool) -> Result<()> {
    if dry_run {
        let store = api.build_index(api.load_documents()?);
        let pending = api.pending_followups(&store)?;
        if pending.is_empty() {
            print_messages(&[CmdMessage::info("No new follow-ups")]);
        }
        for p in &pending {
            println!("{}", p.identity.dimmed());
            for item in &p.items {
                println!("  {}", task_line(item));
            }
        }
        return Ok(());
    }

    let result = api.followups()?;
    for item in &result.followups {
        println!("{}", task_line(item));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_state(api: &MinutesApi<FileStateStore>) -> Result<()> {
    let keys = api.emitted_keys()?;
    if keys.is_empty() {
        print_messages(&[CmdMessage::info("No follow-ups emitted yet")]);
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
