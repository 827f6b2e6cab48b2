//! SQL profile data model.
//!
//! A [`SqlProfile`] records which tables and columns a query reads
//! (dependencies) and which it creates or modifies (outcomes). Profiles are
//! normalized once at construction and treated as read-only afterwards:
//! table keys and column sets are kept sorted, duplicates are removed, and a
//! wildcard column collapses the whole column set for its table.
//!
//! # Example
//!
//! ```
//! use smallvec::smallvec;
//! use sqldeps::profile::{RawMapping, SqlProfile};
//!
//! let mut dependencies = RawMapping::new();
//! dependencies.insert("public.users".into(), smallvec!["name".into(), "id".into()]);
//!
//! let profile = SqlProfile::new(dependencies, RawMapping::new());
//! assert_eq!(profile.dependency_tables(), vec!["public.users"]);
//!
//! let columns: Vec<&str> = profile.dependencies["public.users"]
//!     .iter()
//!     .map(|c| c.as_str())
//!     .collect();
//! assert_eq!(columns, vec!["id", "name"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

/// Sentinel column meaning "all columns of this table"
pub const WILDCARD: &str = "*";

/// Type alias for small column vectors (typically < 8 elements)
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// Raw table-to-columns mapping as produced by an extractor
pub type RawMapping = IndexMap<CompactString, ColumnVec>;

/// Deduplicated column set in sorted order
pub type ColumnSet = BTreeSet<CompactString>;

/// Normalized table-to-columns mapping with sorted table keys
pub type TableMapping = BTreeMap<CompactString, ColumnSet>;

/// Table/column dependencies and outcomes of a SQL query
///
/// Equality compares the normalized mapping forms, so two profiles built
/// from differently ordered raw input are equal when they describe the same
/// tables and columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SqlProfile {
    /// Input tables/columns required by the query
    pub dependencies: TableMapping,
    /// Tables/columns created or modified by the query
    pub outcomes:     TableMapping
}

impl SqlProfile {
    /// Build a normalized profile from raw extractor output
    ///
    /// Column collections may be unsorted, contain duplicates, or contain
    /// the wildcard. A wildcard collapses the column set of its table to
    /// exactly `{"*"}`; everything else is deduplicated and sorted.
    pub fn new(dependencies: RawMapping, outcomes: RawMapping) -> Self {
        Self {
            dependencies: normalize_mapping(dependencies),
            outcomes:     normalize_mapping(outcomes)
        }
    }

    /// Get sorted list of dependency tables
    pub fn dependency_tables(&self) -> Vec<CompactString> {
        self.dependencies.keys().cloned().collect()
    }

    /// Get sorted list of outcome tables
    pub fn outcome_tables(&self) -> Vec<CompactString> {
        self.outcomes.keys().cloned().collect()
    }

    /// Check whether the profile records no tables at all
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.outcomes.is_empty()
    }

    /// Plain two-key mapping form used by the cache and structured output
    ///
    /// Round-trips losslessly: deserializing the returned value yields an
    /// equal profile.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "dependencies": self.dependencies,
            "outcomes": self.outcomes
        })
    }

    /// Flatten into one record per table/column pair
    ///
    /// A table with an empty column set yields exactly one record with
    /// `column: None`. Dependency records come before outcome records.
    pub fn to_records(&self) -> Vec<ProfileRecord> {
        let mut records = Vec::new();
        append_records(&mut records, RecordKind::Dependency, &self.dependencies);
        append_records(&mut records, RecordKind::Outcome, &self.outcomes);
        records
    }
}

impl<'de> Deserialize<'de> for SqlProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        // Accept the raw mapping shape and re-normalize through the single
        // construction entry point.
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RawProfile {
            dependencies: RawMapping,
            outcomes:     RawMapping
        }

        let raw = RawProfile::deserialize(deserializer)?;
        Ok(Self::new(raw.dependencies, raw.outcomes))
    }
}

/// Row of the tabular projection of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    /// Whether the row describes a dependency or an outcome
    #[serde(rename = "type")]
    pub kind:   RecordKind,
    /// Schema prefix if the table identifier was qualified
    pub schema: Option<CompactString>,
    /// Bare table name without schema prefix
    pub table:  CompactString,
    /// Column name, `None` when the table was recorded without columns
    pub column: Option<CompactString>
}

/// Kind of a tabular record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Dependency,
    Outcome
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dependency => write!(f, "dependency"),
            Self::Outcome => write!(f, "outcome")
        }
    }
}

/// Split an optionally schema-qualified identifier at the first dot
pub fn split_identifier(identifier: &str) -> (Option<&str>, &str) {
    match identifier.split_once('.') {
        Some((schema, table)) => (Some(schema), table),
        None => (None, identifier)
    }
}

fn append_records(records: &mut Vec<ProfileRecord>, kind: RecordKind, mapping: &TableMapping) {
    for (table, columns) in mapping {
        let (schema, table_name) = split_identifier(table);
        if columns.is_empty() {
            records.push(ProfileRecord {
                kind,
                schema: schema.map(CompactString::from),
                table: CompactString::from(table_name),
                column: None
            });
        } else {
            for column in columns {
                records.push(ProfileRecord {
                    kind,
                    schema: schema.map(CompactString::from),
                    table: CompactString::from(table_name),
                    column: Some(column.clone())
                });
            }
        }
    }
}

fn normalize_mapping(raw: RawMapping) -> TableMapping {
    raw.into_iter()
        .map(|(table, columns)| (table, normalize_columns(columns)))
        .collect()
}

/// Collapse to the wildcard if present, otherwise deduplicate and sort
fn normalize_columns(columns: ColumnVec) -> ColumnSet {
    if columns.iter().any(|column| column.as_str() == WILDCARD) {
        wildcard_set()
    } else {
        columns.into_iter().collect()
    }
}

pub(crate) fn wildcard_set() -> ColumnSet {
    let mut columns = ColumnSet::new();
    columns.insert(CompactString::const_new(WILDCARD));
    columns
}
