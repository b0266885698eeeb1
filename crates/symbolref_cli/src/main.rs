//! Command-line shell over `symbolref_core`.
//!
//! # Responsibility
//! - Load a symbol dataset and expose lookup, search and copy formats.
//! - Drive the favorites index and language preference against a state database.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use symbolref_core::{
    encode, encode_all, init_logging, load_language, save_language, AddOutcome, CopyFormat,
    FavoritesIndex, FavoritesOptions, FormatGroup, Language, RemoveOutcome,
    SqliteKvStore, SymbolDataset, SymbolFilter,
};

const DEFAULT_STATE_DB: &str = "symbolref_state.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "symbolref", version, about = "Browse and copy Unicode symbols")]
struct Cli {
    /// Dataset bundle (`{ "categories": [...], "symbols": [...] }`).
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// State database holding favorites and the language preference.
    #[arg(long, global = true, default_value = DEFAULT_STATE_DB)]
    state_db: PathBuf,
    /// Display language (`zh`, `en`, `ja`); defaults to the stored preference.
    #[arg(long, global = true)]
    lang: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints core linkage info.
    Ping,
    /// Prints dataset statistics.
    Stats,
    /// Lists categories with symbol counts.
    Categories,
    /// Searches symbols by name, glyph, code point or category.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Prints every copy format of one symbol, grouped as in the copy menu.
    Formats { id: String },
    /// Prints one copy format of one symbol.
    Copy { id: String, format: String },
    /// Concatenates the glyphs of several symbols.
    Batch { ids: Vec<String> },
    #[command(subcommand)]
    Fav(FavCommand),
    /// Shows or stores the preferred language.
    Lang { code: Option<String> },
}

#[derive(Debug, Subcommand)]
enum FavCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| symbolref_core::default_log_level());
        init_logging(level, log_dir)?;
    }

    match &cli.command {
        Command::Ping => {
            println!("symbolref_core ping={}", symbolref_core::ping());
            println!("symbolref_core version={}", symbolref_core::core_version());
        }
        Command::Stats => {
            let stats = load_dataset(&cli)?.stats();
            println!(
                "categories={} symbols={}",
                stats.total_categories, stats.total_symbols
            );
            for entry in stats.symbols_by_category {
                println!("{}\t{}\t{}", entry.id, entry.count, entry.name);
            }
        }
        Command::Categories => {
            let dataset = load_dataset(&cli)?;
            let language = resolve_language(&cli)?;
            let counts = dataset.category_counts();
            for category in dataset.categories() {
                println!(
                    "{}\t{}\t{}",
                    category.id,
                    counts.get(&category.id).copied().unwrap_or(0),
                    category.display_name(language)
                );
            }
        }
        Command::Search { query, category } => {
            let dataset = load_dataset(&cli)?;
            let language = resolve_language(&cli)?;
            let mut filter = SymbolFilter::new(query.as_str()).with_language(language);
            if let Some(category) = category {
                filter = filter.in_category(category.as_str());
            }
            for symbol in dataset.search(&filter) {
                println!(
                    "{}\t{}\t{}\t{}",
                    symbol.id,
                    symbol.symbol,
                    symbol.unicode,
                    symbol.display_name(language)
                );
            }
        }
        Command::Formats { id } => {
            let dataset = load_dataset(&cli)?;
            let language = resolve_language(&cli)?;
            let symbol = dataset
                .symbol(id)
                .ok_or_else(|| anyhow!("unknown symbol id `{id}`"))?;
            for group in FormatGroup::ALL {
                println!("[{group:?}]");
                for format in group.formats() {
                    println!("  {:<10} {}", format.key(), encode(symbol, *format, language));
                }
            }
            println!("[Other]");
            for (format, value) in encode_all(symbol, language) {
                if format.group().is_none() {
                    println!("  {:<10} {}", format.key(), value);
                }
            }
        }
        Command::Copy { id, format } => {
            let dataset = load_dataset(&cli)?;
            let language = resolve_language(&cli)?;
            let symbol = dataset
                .symbol(id)
                .ok_or_else(|| anyhow!("unknown symbol id `{id}`"))?;
            let format = CopyFormat::from_key(format)
                .ok_or_else(|| anyhow!("unknown format `{format}`"))?;
            println!("{}", encode(symbol, format, language));
        }
        Command::Batch { ids } => {
            let dataset = load_dataset(&cli)?;
            let symbols = ids
                .iter()
                .map(|id| {
                    dataset
                        .symbol(id)
                        .ok_or_else(|| anyhow!("unknown symbol id `{id}`"))
                })
                .collect::<Result<Vec<_>>>()?;
            println!("{}", symbolref_core::batch_text(symbols));
        }
        Command::Fav(command) => run_favorites(&cli, command)?,
        Command::Lang { code } => {
            let store = open_state(&cli)?;
            match code {
                Some(code) => {
                    let language = Language::parse(code)
                        .ok_or_else(|| anyhow!("unsupported language `{code}`"))?;
                    save_language(&store, language)?;
                    println!("{language}");
                }
                None => println!("{}", load_language(&store)),
            }
        }
    }

    Ok(())
}

fn run_favorites(cli: &Cli, command: &FavCommand) -> Result<()> {
    let mut favorites = FavoritesIndex::new(open_state(cli)?, FavoritesOptions::default());
    favorites.initialize()?;

    match command {
        FavCommand::List => {
            let language = resolve_language(cli)?;
            for symbol in favorites.favorites() {
                println!(
                    "{}\t{}\t{}",
                    symbol.id,
                    symbol.symbol,
                    symbol.display_name(language)
                );
            }
        }
        FavCommand::Add { id } => {
            let dataset = load_dataset(cli)?;
            let symbol = dataset
                .symbol(id)
                .ok_or_else(|| anyhow!("unknown symbol id `{id}`"))?;
            match favorites.add(symbol)? {
                AddOutcome::Added => println!("added {id}"),
                AddOutcome::AlreadyPresent => println!("{id} is already a favorite"),
            }
        }
        FavCommand::Remove { id } => match favorites.remove(id)? {
            RemoveOutcome::Removed => println!("removed {id}"),
            RemoveOutcome::NotPresent => println!("{id} is not a favorite"),
        },
        FavCommand::Clear => {
            favorites.clear()?;
            println!("cleared");
        }
    }

    // Short-lived process: wait for the debounced write instead of dropping it.
    favorites.dispose();
    Ok(())
}

fn load_dataset(cli: &Cli) -> Result<SymbolDataset> {
    let Some(path) = cli.dataset.as_ref() else {
        bail!("--dataset is required for this command");
    };
    SymbolDataset::from_json_file(path)
        .with_context(|| format!("failed to load dataset `{}`", path.display()))
}

fn open_state(cli: &Cli) -> Result<SqliteKvStore> {
    SqliteKvStore::open(&cli.state_db)
        .with_context(|| format!("failed to open state database `{}`", cli.state_db.display()))
}

fn resolve_language(cli: &Cli) -> Result<Language> {
    match cli.lang.as_deref() {
        Some(code) => {
            Language::parse(code).ok_or_else(|| anyhow!("unsupported language `{code}`"))
        }
        None => Ok(load_language(&open_state(cli)?)),
    }
}
