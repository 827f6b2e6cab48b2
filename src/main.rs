//! # sqldeps
//!
//! Extract, merge, and cache table/column dependencies and outcomes of SQL
//! queries.
//!
//! `sqldeps` works with profiles: normalized records of which tables and
//! columns a query reads (dependencies) and which it creates or modifies
//! (outcomes). Profiles produced by an extractor can be merged across files
//! and cached on disk keyed by source file content, so unchanged SQL is
//! never re-processed.
//!
//! # Quick Start
//!
//! ```bash
//! # Merge extracted profiles and print a readable summary
//! sqldeps merge analysis/*.json
//!
//! # Machine-readable output for downstream tooling
//! sqldeps merge analysis/*.json -f csv > deps.csv
//!
//! # Stream a profile from stdin
//! cat profile.json | sqldeps merge -
//!
//! # Drop all cached profiles
//! sqldeps cache clean
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQLDEPS_CACHE_DIR`)
//! 3. `.sqldeps.toml` in current directory
//! 4. `~/.config/sqldeps/config.toml`
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Failure (unreadable input, invalid profile, cache cleanup failure)
//!
//! # Modules
//!
//! - [`sqldeps::profile`] - Dependency/outcome data model and tabular
//!   projection
//! - [`sqldeps::merge`] - Deterministic profile merging
//! - [`sqldeps::cache`] - Content-addressed profile cache
//! - [`sqldeps::config`] - Configuration loading and validation
//! - [`sqldeps::output`] - Result formatting for various output formats
//! - [`sqldeps::error`] - Error types and constructors

use std::{io, process};

use clap::Parser;
use sqldeps::{
    app::{MergeParams, run_cache_clean, run_merge},
    cli::{CacheAction, Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();

    init_logging(matches!(cli.command, Commands::Merge { verbose: true, .. }));

    let config = Config::load()?;

    let result = match cli.command {
        Commands::Merge {
            files,
            output_format,
            output,
            verbose,
            no_color
        } => run_merge(MergeParams {
            files,
            output_format,
            output,
            verbose,
            no_color
        })?,
        Commands::Cache {
            action: CacheAction::Clean {
                cache_dir
            }
        } => run_cache_clean(cache_dir, &config)?
    };

    for line in &result.stdout {
        println!("{}", line);
    }
    Ok(result.exit_code)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
