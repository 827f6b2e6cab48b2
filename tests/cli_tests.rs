// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sqldeps::cli::Format;

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
    let _csv = Format::Csv;
}

#[test]
fn test_format_clone() {
    let format = Format::Json;
    let _cloned = format.clone();
}

#[test]
fn test_format_debug() {
    let format = Format::Csv;
    let debug = format!("{:?}", format);
    assert!(debug.contains("Csv"));
}
