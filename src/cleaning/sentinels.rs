use crate::inference::is_sentinel;
use crate::table::{Table, Value};

/// Replace sentinel tokens with the missing marker in every column.
/// Returns the table and the number of cells converted.
pub fn replace_sentinels(mut table: Table, tokens: &[String]) -> (Table, usize) {
    let mut converted = 0;
    for column in table.columns_mut() {
        for value in column.values.iter_mut() {
            if matches!(value, Value::Text(s) if is_sentinel(s, tokens)) {
                *value = Value::Missing;
                converted += 1;
            }
        }
    }
    (table, converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CleaningOptions;

    #[test]
    fn test_all_sentinels_become_missing() {
        let raw = ["N/A", "null", "", "?", "-", " NA ", "None", "??", "Unknown", "kept"];
        let table = Table::from_records(
            vec!["col".into()],
            raw.iter().map(|s| vec![s.to_string()]).collect(),
        );
        let (table, converted) =
            replace_sentinels(table, &CleaningOptions::default().sentinel_tokens);

        assert_eq!(converted, 9);
        let values = &table.column("col").unwrap().values;
        assert!(values[..9].iter().all(|v| *v == Value::Missing));
        assert_eq!(values[9], Value::Text("kept".into()));
    }

    #[test]
    fn test_custom_tokens() {
        let table = Table::from_records(
            vec!["col".into()],
            vec![vec!["n/a".into()], vec!["#N/A".into()]],
        );
        let (table, converted) = replace_sentinels(table, &["#n/a".to_string()]);

        assert_eq!(converted, 1);
        assert_eq!(
            table.column("col").unwrap().values,
            vec![Value::Text("n/a".into()), Value::Missing]
        );
    }
}
