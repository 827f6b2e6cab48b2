//! Merging of multiple SQL profiles.
//!
//! Combines profiles extracted from separate statements or files into a
//! single profile. Column sets are unioned per table; a wildcard supersedes
//! every specific column recorded for the same table, no matter which input
//! contributed it.

use std::collections::btree_map::Entry;

use crate::profile::{ColumnSet, SqlProfile, TableMapping, WILDCARD, wildcard_set};

/// Merge profiles in input order into a single profile
///
/// An empty slice yields an empty profile. The per-table result does not
/// depend on input order: specific columns accumulate as a union, and a
/// wildcard for a table always wins whether it arrives before or after
/// specific columns.
pub fn merge_profiles(profiles: &[SqlProfile]) -> SqlProfile {
    let mut dependencies = TableMapping::new();
    let mut outcomes = TableMapping::new();

    for profile in profiles {
        merge_mapping(&mut dependencies, &profile.dependencies);
        merge_mapping(&mut outcomes, &profile.outcomes);
    }

    SqlProfile {
        dependencies,
        outcomes
    }
}

fn merge_mapping(accumulator: &mut TableMapping, incoming: &TableMapping) {
    for (table, columns) in incoming {
        match accumulator.entry(table.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(columns.clone());
            }
            Entry::Occupied(mut entry) => merge_columns(entry.get_mut(), columns)
        }
    }
}

/// Union two normalized column sets, keeping the wildcard dominant
fn merge_columns(current: &mut ColumnSet, incoming: &ColumnSet) {
    if current.contains(WILDCARD) {
        return;
    }
    if incoming.contains(WILDCARD) {
        *current = wildcard_set();
        return;
    }
    current.extend(incoming.iter().cloned());
}
