use tracing::debug;

use crate::inference::parse_numeric;
use crate::table::{Table, Value};
use crate::types::DType;

/// Trim surrounding whitespace from every text cell of text columns
pub fn trim_text(mut table: Table) -> Table {
    for column in table.columns_mut() {
        if column.dtype != DType::Text {
            continue;
        }
        for value in column.values.iter_mut() {
            if let Value::Text(s) = value {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }
    table
}

/// Canonical gender for a token, if recognised
pub fn canonical_gender(token: &str) -> Option<&'static str> {
    match token.trim().to_lowercase().as_str() {
        "m" | "male" | "man" => Some("male"),
        "f" | "female" | "woman" => Some("female"),
        _ => None,
    }
}

/// Map gender tokens to "male"/"female"; anything else becomes missing.
/// Returns the table and the columns rewritten.
pub fn normalize_gender(mut table: Table, columns: &[String]) -> (Table, Vec<String>) {
    let mut handled = Vec::new();
    for name in columns {
        let Some(column) = table.column_mut(name).filter(|c| c.dtype == DType::Text) else {
            debug!(column = %name, "gender column is not text; skipped");
            continue;
        };
        for value in column.values.iter_mut() {
            if let Value::Text(s) = value {
                *value = canonical_gender(s)
                    .map(|g| Value::Text(g.to_string()))
                    .unwrap_or(Value::Missing);
            }
        }
        handled.push(name.clone());
    }
    (table, handled)
}

/// Convert age columns to numbers, dropping unparseable or out-of-range values.
/// Returns the table and the columns converted.
pub fn normalize_age(mut table: Table, columns: &[String], min: f64, max: f64) -> (Table, Vec<String>) {
    let mut handled = Vec::new();
    for name in columns {
        let Some(column) = table.column_mut(name).filter(|c| c.dtype == DType::Text) else {
            debug!(column = %name, "age column is not text; skipped");
            continue;
        };
        for value in column.values.iter_mut() {
            *value = match value {
                Value::Text(s) => parse_numeric(s)
                    .filter(|age| (min..=max).contains(age))
                    .map(Value::Number)
                    .unwrap_or(Value::Missing),
                _ => Value::Missing,
            };
        }
        column.dtype = DType::Numeric;
        handled.push(name.clone());
    }
    (table, handled)
}

/// Digits of a phone number when its length is within bounds
pub fn clean_phone(raw: &str, min_digits: usize, max_digits: usize) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    (min_digits..=max_digits)
        .contains(&digits.len())
        .then_some(digits)
}

/// Reduce phone columns to digit strings of acceptable length.
/// Returns the table and the columns rewritten.
pub fn normalize_phone(
    mut table: Table,
    columns: &[String],
    min_digits: usize,
    max_digits: usize,
) -> (Table, Vec<String>) {
    let mut handled = Vec::new();
    for name in columns {
        let Some(column) = table.column_mut(name).filter(|c| c.dtype == DType::Text) else {
            debug!(column = %name, "phone column is not text; skipped");
            continue;
        };
        for value in column.values.iter_mut() {
            if let Value::Text(s) = value {
                *value = clean_phone(s, min_digits, max_digits)
                    .map(Value::Text)
                    .unwrap_or(Value::Missing);
            }
        }
        handled.push(name.clone());
    }
    (table, handled)
}
