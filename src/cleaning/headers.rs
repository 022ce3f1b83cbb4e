use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::Table;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\p{P}\p{S}]+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Canonical snake_case form of a column name; `position` is 0-based and only
/// used when nothing survives normalization
pub fn normalize_header(name: &str, position: usize) -> String {
    let lower = name.trim().to_lowercase();
    let separated = SEPARATOR_RUN.replace_all(&lower, "_");
    let ascii = DISALLOWED.replace_all(&separated, "");
    let collapsed = UNDERSCORE_RUN.replace_all(&ascii, "_");
    let cleaned = collapsed.trim_matches('_');

    if cleaned.is_empty() {
        format!("column_{}", position + 1)
    } else {
        cleaned.to_string()
    }
}

/// Rewrite every column name in place
pub fn normalize_headers(mut table: Table) -> Table {
    for (idx, column) in table.columns_mut().iter_mut().enumerate() {
        column.name = normalize_header(&column.name, idx);
    }
    table
}
