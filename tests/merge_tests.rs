// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use compact_str::CompactString;
use sqldeps::{
    merge::merge_profiles,
    profile::{RawMapping, SqlProfile}
};

fn mapping(entries: &[(&str, &[&str])]) -> RawMapping {
    let mut mapping = RawMapping::new();
    for (table, columns) in entries {
        mapping.insert(
            CompactString::from(*table),
            columns.iter().map(|c| CompactString::from(*c)).collect()
        );
    }
    mapping
}

fn profile(dependencies: &[(&str, &[&str])], outcomes: &[(&str, &[&str])]) -> SqlProfile {
    SqlProfile::new(mapping(dependencies), mapping(outcomes))
}

#[test]
fn test_merge_profiles_across_schemas_and_wildcards() {
    // First profile: normal tables with specific columns
    let first = profile(
        &[
            ("public.users", &["id", "name"]),
            ("sales.orders", &["order_id", "user_id"])
        ],
        &[("report.monthly_sales", &["month", "total_sales"])]
    );

    // Second profile: a mix of specific columns and a wildcard
    let second = profile(
        &[
            ("sales.orders", &["*"]),
            ("products", &["product_id", "name"])
        ],
        &[
            ("report.monthly_sales", &["category"]),
            ("temp.product_summary", &["product_id", "sales_count"])
        ]
    );

    // Third profile: another table and more columns for existing ones
    let third = profile(
        &[
            ("public.users", &["email"]),
            ("payments", &["payment_id", "user_id"])
        ],
        &[
            ("report.user_activity", &["user_id", "last_login"]),
            ("temp.product_summary", &["*"])
        ]
    );

    let merged = merge_profiles(&[first, second, third]);

    let expected = profile(
        &[
            ("payments", &["payment_id", "user_id"]),
            ("products", &["name", "product_id"]),
            ("public.users", &["email", "id", "name"]),
            ("sales.orders", &["*"])
        ],
        &[
            ("report.monthly_sales", &["category", "month", "total_sales"]),
            ("report.user_activity", &["last_login", "user_id"]),
            ("temp.product_summary", &["*"])
        ]
    );

    assert_eq!(merged, expected);
}

#[test]
fn test_merge_empty_sequence_yields_empty_profile() {
    let merged = merge_profiles(&[]);
    assert!(merged.is_empty());
}

#[test]
fn test_merge_single_element_equals_element() {
    let single = profile(&[("users", &["id", "name"])], &[("report", &["total"])]);
    let merged = merge_profiles(std::slice::from_ref(&single));
    assert_eq!(merged, single);
}

#[test]
fn test_merge_unions_specific_columns() {
    let first = profile(&[("users", &["id"])], &[]);
    let second = profile(&[("users", &["name"])], &[]);
    let merged = merge_profiles(&[first, second]);
    let columns: Vec<&str> = merged.dependencies["users"].iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, vec!["id", "name"]);
}

#[test]
fn test_merge_disjoint_tables() {
    let first = profile(&[("users", &["id"])], &[]);
    let second = profile(&[("orders", &["total"])], &[]);
    let merged = merge_profiles(&[first, second]);
    assert_eq!(merged.dependency_tables(), vec!["orders", "users"]);
}

#[test]
fn test_wildcard_from_later_profile_overrides_accumulated_columns() {
    // End-to-end ordering case: specific, wildcard, specific again
    let first = profile(&[("sales.orders", &["order_id"])], &[]);
    let second = profile(&[("sales.orders", &["*"])], &[]);
    let third = profile(&[("sales.orders", &["order_id", "user_id"])], &[]);

    let merged = merge_profiles(&[first, second, third]);
    let columns: Vec<&str> = merged.dependencies["sales.orders"]
        .iter()
        .map(|c| c.as_str())
        .collect();
    assert_eq!(columns, vec!["*"]);
}

#[test]
fn test_wildcard_from_first_profile_is_sticky() {
    let first = profile(&[("users", &["*"])], &[]);
    let second = profile(&[("users", &["id", "name"])], &[]);
    let merged = merge_profiles(&[first, second]);
    let columns: Vec<&str> = merged.dependencies["users"].iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, vec!["*"]);
}

#[test]
fn test_wildcard_dominance_is_order_independent() {
    let specific = profile(&[("users", &["id", "name"])], &[]);
    let wildcard = profile(&[("users", &["*"])], &[]);

    let forward = merge_profiles(&[specific.clone(), wildcard.clone()]);
    let backward = merge_profiles(&[wildcard, specific]);
    assert_eq!(forward, backward);
}

#[test]
fn test_merge_is_associative() {
    let a = profile(&[("users", &["id"])], &[("report", &["total"])]);
    let b = profile(&[("users", &["name"]), ("orders", &["*"])], &[]);
    let c = profile(&[("orders", &["amount"])], &[("report", &["month"])]);

    let left = merge_profiles(&[merge_profiles(&[a.clone(), b.clone()]), c.clone()]);
    let flat = merge_profiles(&[a, b, c]);
    assert_eq!(left, flat);
}

#[test]
fn test_merge_table_with_empty_columns_unions_with_columns() {
    let first = profile(&[("users", &[])], &[]);
    let second = profile(&[("users", &["id"])], &[]);
    let merged = merge_profiles(&[first, second]);
    let columns: Vec<&str> = merged.dependencies["users"].iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, vec!["id"]);
}

#[test]
fn test_merge_applies_to_outcomes_independently() {
    let first = profile(&[("users", &["*"])], &[("users", &["id"])]);
    let second = profile(&[], &[("users", &["name"])]);
    let merged = merge_profiles(&[first, second]);

    let dependency_columns: Vec<&str> =
        merged.dependencies["users"].iter().map(|c| c.as_str()).collect();
    let outcome_columns: Vec<&str> =
        merged.outcomes["users"].iter().map(|c| c.as_str()).collect();
    assert_eq!(dependency_columns, vec!["*"]);
    assert_eq!(outcome_columns, vec!["id", "name"]);
}
