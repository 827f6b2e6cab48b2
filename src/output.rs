use colored::Colorize;

use crate::profile::{ProfileRecord, RecordKind, SqlProfile, TableMapping};

/// Output format for profiles
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Csv
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Format a profile based on output options
pub fn format_profile(profile: &SqlProfile, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(profile).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(profile).unwrap_or_default(),
        OutputFormat::Csv => format_records_csv(&profile.to_records()),
        OutputFormat::Text => format_text_summary(profile, opts)
    }
}

/// Format tabular records as CSV with a `type,schema,table,column` header
///
/// Nullable fields render as empty cells.
pub fn format_records_csv(records: &[ProfileRecord]) -> String {
    let mut csv = String::from("type,schema,table,column\n");

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            record.kind,
            record.schema.as_deref().unwrap_or(""),
            record.table,
            record.column.as_deref().unwrap_or("")
        ));
    }

    csv
}

fn format_text_summary(profile: &SqlProfile, opts: &OutputOptions) -> String {
    let mut summary = String::from("SQL Profile:\n\n");

    summary.push_str(&format_section("Dependencies:", &profile.dependencies, opts));
    summary.push_str(&format_section("Outcomes:", &profile.outcomes, opts));

    if opts.verbose {
        let records = profile.to_records();
        let dependency_rows = records
            .iter()
            .filter(|r| r.kind == RecordKind::Dependency)
            .count();
        summary.push_str(&format!(
            "Totals: {} dependency rows, {} outcome rows\n",
            dependency_rows,
            records.len() - dependency_rows
        ));
    }

    summary
}

fn format_section(header: &str, mapping: &TableMapping, opts: &OutputOptions) -> String {
    let mut section = String::new();

    if opts.colored {
        section.push_str(&header.cyan().bold().to_string());
    } else {
        section.push_str(header);
    }
    section.push('\n');

    if mapping.is_empty() {
        section.push_str("  (none)\n");
    }
    for (table, columns) in mapping {
        if columns.is_empty() {
            section.push_str(&format!("  {}\n", table));
        } else {
            let cols: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
            section.push_str(&format!("  {}: {}\n", table, cols.join(", ")));
        }
    }
    section.push('\n');

    section
}
