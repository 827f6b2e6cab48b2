//! Application logic for the sqldeps CLI.
//!
//! This module contains the core application logic separated from the main
//! entry point to enable testing.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf}
};

use rayon::prelude::*;

use crate::{
    cache::cleanup_cache,
    cli::Format,
    config::Config,
    error::{AppResult, file_read_error, file_write_error, profile_parse_error},
    merge::merge_profiles,
    output::{OutputFormat, OutputOptions, format_profile},
    profile::SqlProfile
};

/// Parameters for the merge command
#[derive(Debug, Clone)]
pub struct MergeParams {
    pub files:         Vec<PathBuf>,
    pub output_format: Format,
    pub output:        Option<PathBuf>,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Output from CLI command execution
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=success, 1=failure)
    pub exit_code: i32,
    /// Lines to print to stdout
    pub stdout:    Vec<String>
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml,
        Format::Csv => OutputFormat::Csv
    }
}

/// Create output options from parameters
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

/// Parse a profile from JSON text
pub fn parse_profile(name: &str, content: &str) -> AppResult<SqlProfile> {
    serde_json::from_str(content).map_err(|e| profile_parse_error(name, e.to_string()))
}

/// Read a profile from a JSON file or stdin
pub fn read_profile_input(path: &Path) -> AppResult<SqlProfile> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        parse_profile("stdin", &buffer)
    } else {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| file_read_error(&display, e))?;
        parse_profile(&display, &content)
    }
}

/// Load profiles from files (parallel)
pub fn load_profiles(files: &[PathBuf]) -> AppResult<Vec<SqlProfile>> {
    let profiles: Result<Vec<_>, _> =
        files.par_iter().map(|file| read_profile_input(file)).collect();
    profiles
}

/// Run the merge command
pub fn run_merge(params: MergeParams) -> AppResult<CommandOutput> {
    let profiles = load_profiles(&params.files)?;
    let merged = merge_profiles(&profiles);
    let opts = create_output_options(params.output_format, params.no_color, params.verbose);
    let formatted = format_profile(&merged, &opts);

    if let Some(output) = &params.output {
        fs::write(output, &formatted)
            .map_err(|e| file_write_error(&output.display().to_string(), e))?;
        return Ok(CommandOutput {
            exit_code: 0,
            stdout:    vec![format!("Merged profile written to {}", output.display())]
        });
    }

    Ok(CommandOutput {
        exit_code: 0,
        stdout:    vec![formatted]
    })
}

/// Run the cache clean command
pub fn run_cache_clean(cache_dir: Option<PathBuf>, config: &Config) -> AppResult<CommandOutput> {
    let dir = cache_dir.unwrap_or_else(|| config.cache.dir.clone());

    if cleanup_cache(&dir) {
        Ok(CommandOutput {
            exit_code: 0,
            stdout:    vec![format!("Cache cleaned: {}", dir.display())]
        })
    } else {
        Ok(CommandOutput {
            exit_code: 1,
            stdout:    vec![format!("Cache cleanup failed: {}", dir.display())]
        })
    }
}
