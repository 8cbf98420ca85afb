//! Binary entry point: rebuild the tune store from the book folders, freeze a
//! snapshot of it, and hand that snapshot to the interactive menu.
use std::path::PathBuf;

use abc_tune_catalog::db::{ensure_schema, open_store};
use abc_tune_catalog::{rebuild_catalog, run_app, App, Config, DisplayOptions, TuneSnapshot};
use anyhow::Context;
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "abc-tune-catalog")]
#[command(about = "Index ABC tune books into SQLite and browse them", long_about = None)]
struct Cli {
    /// Directory holding numbered book folders (defaults to ./abc_books)
    #[arg(short, long)]
    books_dir: Option<PathBuf>,

    /// SQLite database file (defaults to ~/.abc-tune-catalog/tunes.sqlite)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Browse the existing database without re-reading the books
    #[arg(long)]
    skip_ingest: bool,

    /// Show at most this many rows per result table
    #[arg(long)]
    max_rows: Option<usize>,

    /// Truncate table cells to this many characters
    #[arg(long)]
    max_col_width: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let display = DisplayOptions {
        max_rows: cli.max_rows,
        max_col_width: cli.max_col_width,
    };
    let config = Config::resolve(cli.books_dir, cli.db, cli.skip_ingest, display)
        .context("failed to resolve configuration")?;

    let conn = open_store(&config.db_path).context("failed to open tune store")?;

    if config.skip_ingest {
        info!("skipping ingestion; using {}", config.db_path.display());
        ensure_schema(&conn).context("failed to prepare tune store")?;
    } else {
        let stats = rebuild_catalog(&conn, &config.books_dir).with_context(|| {
            format!("failed to load books from {}", config.books_dir.display())
        })?;
        info!("ingested {} tunes", stats.tunes);
    }

    let snapshot = TuneSnapshot::load(&conn).context("failed to load tunes")?;
    drop(conn);

    let mut app = App::new(snapshot, config.display);
    run_app(&mut app)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
