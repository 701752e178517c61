// src/main.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use anyhow::{Context, Result};
use bore::{Config, Entry, Filter, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bore", version, about = "Tag files and find them by tag")]
struct Cli {
    /// Path to the tag database (overrides BORE_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the tags of a file (no tags records the file untagged)
    Put {
        file: PathBuf,
        tags: Vec<String>,
    },
    /// Print the tags of a file
    Get {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List files having every TAG and none of the -TAG terms
    Search {
        #[arg(allow_hyphen_values = true)]
        terms: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Rename a tag on every file
    Rename { old_tag: String, new_tag: String },
    /// Move a file's tags to a new path
    Move { from: PathBuf, to: PathBuf },
    /// Forget a file
    Delete { file: PathBuf },
    /// List every indexed file
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    let mut store = Store::open(&config)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    if let Some(path) = store.path() {
        tracing::debug!("Using database: {}", path.display());
    }

    let code = run(&mut store, cli.command)?;
    store.close()?;
    Ok(code)
}

fn run(store: &mut Store, command: Command) -> Result<ExitCode> {
    match command {
        Command::Put { file, tags } => {
            let path = absolute(&file)?;
            let tx = store.write()?;
            tx.put(&path, &tags)?;
            tx.commit()?;
        }
        Command::Get { file, json } => {
            let path = absolute(&file)?;
            let tx = store.read()?;
            let Some(tags) = tx.get(&path)? else {
                eprintln!("not present in db");
                return Ok(ExitCode::FAILURE);
            };
            if json {
                println!("{}", serde_json::to_string(&Entry { path, tags })?);
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }
        Command::Search { terms, json } => {
            let filter = Filter::from_terms(&terms);
            let tx = store.read()?;
            print_entries(&tx.search_filter(&filter)?, json)?;
        }
        Command::Rename { old_tag, new_tag } => {
            let tx = store.write()?;
            let rewritten = tx.rename(&old_tag, &new_tag)?;
            tx.commit()?;
            tracing::info!("Renamed {} -> {} on {} files", old_tag, new_tag, rewritten);
        }
        Command::Move { from, to } => {
            let (from, to) = (absolute(&from)?, absolute(&to)?);
            let tx = store.write()?;
            if !tx.move_entry(&from, &to)? {
                eprintln!("not present in db");
                return Ok(ExitCode::FAILURE);
            }
            tx.commit()?;
        }
        Command::Delete { file } => {
            let path = absolute(&file)?;
            let tx = store.write()?;
            tx.delete(&path)?;
            tx.commit()?;
        }
        Command::List { json } => {
            let tx = store.read()?;
            print_entries(&tx.entries()?, json)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_entries(entries: &[Entry], json: bool) -> Result<()> {
    for entry in entries {
        if json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}", entry.path);
        }
    }
    Ok(())
}

fn absolute(file: &Path) -> Result<String> {
    let abs = std::path::absolute(file)
        .with_context(|| format!("resolving {}", file.display()))?;
    abs.into_os_string()
        .into_string()
        .map_err(|raw| anyhow::anyhow!("path is not valid UTF-8: {:?}", raw))
}
