use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Dependency Profiler - Extract, merge, and cache SQL table/column usage
#[derive(Parser, Debug)]
#[command(name = "sqldeps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge extracted profiles into a single profile
    Merge {
        /// Profile JSON files to merge (use - for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable verbose output with record counts
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Manage the profile cache
    Cache {
        #[command(subcommand)]
        action: CacheAction
    }
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Delete cached profiles and remove the cache directory if empty
    Clean {
        /// Cache root directory
        #[arg(long, env = "SQLDEPS_CACHE_DIR")]
        cache_dir: Option<PathBuf>
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
    Csv
}
