use crate::inference::{is_numeric, parse_numeric};
use crate::table::{Column, Table, Value};
use crate::types::DType;

/// Share of non-missing text cells that parse as numbers, `None` if all are missing
pub fn numeric_share(column: &Column) -> Option<f64> {
    let present: Vec<&str> = column.values.iter().filter_map(Value::as_text).collect();
    if present.is_empty() {
        return None;
    }
    let numeric = present.iter().filter(|s| is_numeric(s)).count();
    Some(numeric as f64 / present.len() as f64)
}

/// Convert text columns that look mostly numeric; failures become missing.
/// Columns listed in `skip` are left alone. Returns the table and the columns converted.
pub fn coerce_numeric(mut table: Table, skip: &[String], threshold: f64) -> (Table, Vec<String>) {
    let mut converted = Vec::new();
    for column in table.columns_mut() {
        if column.dtype != DType::Text || skip.contains(&column.name) {
            continue;
        }
        if !numeric_share(column).is_some_and(|share| share >= threshold) {
            continue;
        }
        for value in column.values.iter_mut() {
            *value = match value {
                Value::Text(s) => parse_numeric(s).map(Value::Number).unwrap_or(Value::Missing),
                _ => Value::Missing,
            };
        }
        column.dtype = DType::Numeric;
        converted.push(column.name.clone());
    }
    (table, converted)
}
