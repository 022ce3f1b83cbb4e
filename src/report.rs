use serde::Serialize;

use crate::cleaning::{CappedColumn, ImputedColumn};
use crate::readers::SourceEncoding;
use crate::roles::RoleMap;
use crate::table::Table;

/// Missing-value count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing_count: usize,
    pub missing_pct: f64,
}

/// Per-column missing counts, in table column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MissingReport {
    pub entries: Vec<MissingCount>,
}

impl MissingReport {
    pub fn measure(table: &Table) -> Self {
        let rows = table.row_count();
        let entries = table
            .columns()
            .iter()
            .map(|column| {
                let missing_count = column.missing_count();
                MissingCount {
                    column: column.name.clone(),
                    missing_count,
                    missing_pct: percentage(missing_count, rows),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.missing_count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.missing_count).sum()
    }
}

fn percentage(count: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    let pct = count as f64 / rows as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Everything a pipeline run did, returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub encoding: SourceEncoding,
    pub rows_loaded: usize,
    pub rows_after_dedup: usize,
    pub duplicates_removed: usize,
    pub sentinels_replaced: usize,
    pub roles: RoleMap,
    pub gender_columns: Vec<String>,
    pub age_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub inverted_stays_cleared: usize,
    pub phone_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub capped: Vec<CappedColumn>,
    pub imputed: Vec<ImputedColumn>,
    pub missing_before: MissingReport,
    pub missing_after: MissingReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    #[test]
    fn test_measure() {
        let table = Table::from_columns(vec![
            Column::text("a", vec![Value::Missing, Value::Text("x".into()), Value::Missing]),
            Column::text("b", vec![Value::Text("y".into()); 3]),
        ]);
        let report = MissingReport::measure(&table);

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.get("a"), Some(2));
        assert_eq!(report.get("b"), Some(0));
        assert_eq!(report.entries[0].missing_pct, 66.67);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_empty_table_has_zero_pct() {
        let table = Table::from_records(vec!["a".into()], vec![]);
        let report = MissingReport::measure(&table);
        assert_eq!(report.entries[0].missing_pct, 0.0);
    }
}
