use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use t201_script::analytics::summarize;
use t201_script::config::{DataDir, DATA_DIR_ENV};
use t201_script::export::{export_to_dir, ExportDocument};
use t201_script::generate::{delete_data, DataGenerator, DEFAULT_SEED};
use t201_script::prompt::{confirm_stdio, PREFIX};
use t201_script::query::{execute, Query, QueryOptions, SortSpec};
use t201_script::store::{
    CompositeObserver, DirectoryStore, LogObserver, SourceObserver, StdErrObserver,
};
use t201_script::types::{Predicate, COLUMN_NAMES};

#[derive(Parser)]
#[command(name = "t201", about = "Manage and query product data")]
pub struct Cli {
    /// Directory holding the department CSV files and the export (default: ~/.t201-script)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate department CSV files
    Generate {
        /// Number of files
        #[arg(short, long, default_value_t = 10)]
        files: usize,

        /// Number of rows per file
        #[arg(short, long, default_value_t = 200)]
        rows: usize,

        /// Seed for the random generator
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Delete all product data
    Delete,
    /// Fetch, filter and sort data
    Fetch {
        /// Filter data by a key, a comparison operator (== != < > <= >=) and a value
        #[arg(
            short,
            long = "filter",
            num_args = 3,
            value_names = ["KEY", "OPERATOR", "VALUE"],
            allow_hyphen_values = true
        )]
        filters: Vec<String>,

        /// Field to sort data by
        #[arg(short, long, value_parser = PossibleValuesParser::new(COLUMN_NAMES))]
        sort: Option<String>,

        /// Sort data in descending order
        #[arg(short, long)]
        reverse: bool,

        /// Columns to fetch (repeatable), default: all
        #[arg(short = 'c', long = "column", value_parser = PossibleValuesParser::new(COLUMN_NAMES))]
        columns: Vec<String>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = DataDir::resolve(cli.data_dir).context("resolving data directory")?;
    data_dir
        .ensure_exists()
        .with_context(|| format!("creating {}", data_dir.path().display()))?;
    log::debug!("data directory: {}", data_dir.path().display());

    match cli.command {
        Commands::Generate { files, rows, seed } => generate(&data_dir, files, rows, seed),
        Commands::Delete => delete(&data_dir),
        Commands::Fetch {
            filters,
            sort,
            reverse,
            columns,
        } => fetch(&data_dir, build_query(&filters, sort, reverse, columns)),
    }
}

fn generate(data_dir: &DataDir, files: usize, rows: usize, seed: u64) -> Result<()> {
    if !confirm_stdio(&format!("Do you want to generate {files} files of {rows} each ?"))? {
        println!("{PREFIX} Data generation aborted");
        return Ok(());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let generator = DataGenerator::new(&mut rng);
    let report = generator
        .generate(&mut rng, data_dir, files, rows)
        .with_context(|| format!("generating data in {}", data_dir.path().display()))?;

    for path in &report.written {
        println!("Wrote to file {}", file_name(path));
    }
    for (path, err) in &report.failed {
        eprintln!("Failed writing to file {} : {err}", file_name(path));
    }
    println!("{PREFIX} Data generated successfully");
    Ok(())
}

fn delete(data_dir: &DataDir) -> Result<()> {
    if !confirm_stdio("Are you sure you want to delete all data files ?")? {
        println!("{PREFIX} Data deletion aborted");
        return Ok(());
    }

    let removed = delete_data(data_dir)
        .with_context(|| format!("deleting data in {}", data_dir.path().display()))?;
    for name in removed {
        println!("Removed file {name}");
    }
    println!("{PREFIX} Data deleted successfully");
    Ok(())
}

fn fetch(data_dir: &DataDir, query: Query) -> Result<()> {
    if !confirm_stdio(&format!("Are you sure you want to fetch {} ?", query.describe()))? {
        println!("{PREFIX} Data fetching aborted");
        return Ok(());
    }

    let store = DirectoryStore::new(data_dir.path());
    let observers: Vec<Arc<dyn SourceObserver>> =
        vec![Arc::new(StdErrObserver), Arc::new(LogObserver)];
    let options = QueryOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
    };
    let data = execute(&store, &query, &options)
        .with_context(|| format!("fetching data from {}", data_dir.path().display()))?;

    for record in &data {
        println!("{record}");
    }
    let summary = summarize(&data);
    print!("{summary}");
    println!("{PREFIX} Data fetched successfully ({} rows)", data.len());

    if !confirm_stdio("Do you wish to export this data ?")? {
        println!("{PREFIX} Data was not exported");
        return Ok(());
    }
    let analytics = confirm_stdio("Do you want to include analytics ?")?.then_some(summary);
    let path = export_to_dir(data_dir, &ExportDocument::new(data, analytics))?;
    println!("{PREFIX} Data exported to {}", path.display());
    Ok(())
}

fn build_query(
    filters: &[String],
    sort: Option<String>,
    reverse: bool,
    columns: Vec<String>,
) -> Query {
    let mut query = Query::new();
    for chunk in filters.chunks_exact(3) {
        query = query.filter(Predicate::new(&chunk[0], &chunk[1], &chunk[2]));
    }
    if let Some(column) = sort {
        query = query.sort_by(SortSpec {
            column,
            descending: reverse,
        });
    }
    if !columns.is_empty() {
        query = query.select(columns);
    }
    query
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Printed, after `PREFIX`, when the user cancels with Ctrl-C or end of input.
pub const CANCELLED: &str = "Data processing cancelled by user input";

/// On Ctrl-C, print the cancel message and exit 0, as for end of input at a prompt.
///
/// The handler also covers an interrupt that arrives while a query is running.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        println!("\n{PREFIX} {CANCELLED}");
        std::process::exit(0);
    })
}

/// True if `err` (or anything it wraps) is the end of stdin while waiting for an answer.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
    })
}
