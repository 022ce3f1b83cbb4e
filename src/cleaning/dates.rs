use tracing::debug;

use crate::inference::parse_datetime;
use crate::table::{Table, Value};
use crate::types::DType;

/// Parse date-like text columns; unparseable values become missing.
/// Returns the table and the columns converted.
pub fn normalize_dates(mut table: Table, columns: &[String]) -> (Table, Vec<String>) {
    let mut handled = Vec::new();
    for name in columns {
        let Some(column) = table.column_mut(name).filter(|c| c.dtype == DType::Text) else {
            debug!(column = %name, "date column is not text; skipped");
            continue;
        };
        for value in column.values.iter_mut() {
            *value = match value {
                Value::Text(s) => parse_datetime(s)
                    .map(Value::DateTime)
                    .unwrap_or(Value::Missing),
                _ => Value::Missing,
            };
        }
        column.dtype = DType::Temporal;
        handled.push(name.clone());
    }
    (table, handled)
}

/// Blank both dates of any row discharged before it was admitted.
/// Does nothing unless both columns exist and are temporal. Returns the number of rows touched.
pub fn clear_inverted_stays(mut table: Table, admission: &str, discharge: &str) -> (Table, usize) {
    let (Some(adm), Some(dis)) = (table.column(admission), table.column(discharge)) else {
        return (table, 0);
    };
    if adm.dtype != DType::Temporal || dis.dtype != DType::Temporal {
        return (table, 0);
    }

    let inverted: Vec<usize> = adm
        .values
        .iter()
        .zip(&dis.values)
        .enumerate()
        .filter_map(|(idx, (a, d))| match (a.as_datetime(), d.as_datetime()) {
            (Some(a), Some(d)) if d < a => Some(idx),
            _ => None,
        })
        .collect();

    for name in [admission, discharge] {
        if let Some(column) = table.column_mut(name) {
            for &idx in &inverted {
                column.values[idx] = Value::Missing;
            }
        }
    }
    (table, inverted.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use chrono::NaiveDate;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn day(y: i32, m: u32, d: u32) -> Value {
        Value::DateTime(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn test_normalize_dates() {
        let table = Table::from_columns(vec![Column::text(
            "date",
            vec![text("2024-01-15"), text("31/02/2024"), Value::Missing, text("03/04/2024")],
        )]);
        let (table, handled) = normalize_dates(table, &["date".to_string()]);

        assert_eq!(handled, vec!["date"]);
        let column = table.column("date").unwrap();
        assert_eq!(column.dtype, DType::Temporal);
        assert_eq!(
            column.values,
            vec![day(2024, 1, 15), Value::Missing, Value::Missing, day(2024, 3, 4)]
        );
    }

    #[test]
    fn test_numeric_column_not_reparsed() {
        let table = Table::from_columns(vec![Column::new(
            "age_at_admission",
            DType::Numeric,
            vec![Value::Number(40.0)],
        )]);
        let (table, handled) = normalize_dates(table, &["age_at_admission".to_string()]);

        assert!(handled.is_empty());
        assert_eq!(table.column("age_at_admission").unwrap().values, vec![Value::Number(40.0)]);
    }

    #[test]
    fn test_clear_inverted_stays() {
        let table = Table::from_columns(vec![
            Column::new(
                "admission_date",
                DType::Temporal,
                vec![day(2024, 1, 10), day(2024, 2, 10), Value::Missing],
            ),
            Column::new(
                "discharge_date",
                DType::Temporal,
                vec![day(2024, 1, 12), day(2024, 2, 1), day(2024, 3, 1)],
            ),
        ]);
        let (table, touched) = clear_inverted_stays(table, "admission_date", "discharge_date");

        assert_eq!(touched, 1);
        assert_eq!(
            table.column("admission_date").unwrap().values,
            vec![day(2024, 1, 10), Value::Missing, Value::Missing]
        );
        assert_eq!(
            table.column("discharge_date").unwrap().values,
            vec![day(2024, 1, 12), Value::Missing, day(2024, 3, 1)]
        );
    }

    #[test]
    fn test_stay_check_needs_both_columns() {
        let table = Table::from_columns(vec![Column::new(
            "admission_date",
            DType::Temporal,
            vec![day(2024, 1, 10)],
        )]);
        let (_, touched) = clear_inverted_stays(table, "admission_date", "discharge_date");
        assert_eq!(touched, 0);
    }
}
