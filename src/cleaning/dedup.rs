use std::collections::HashSet;

use crate::table::{Table, Value};

/// Hashable identity of a cell; missing compares equal to missing
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Text(&'a str),
    Number(u64),
    DateTime(chrono::NaiveDateTime),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Missing => CellKey::Missing,
            Value::Text(s) => CellKey::Text(s),
            // -0.0 and 0.0 compare equal
            Value::Number(n) => CellKey::Number(if *n == 0.0 { 0 } else { n.to_bits() }),
            Value::DateTime(dt) => CellKey::DateTime(*dt),
        }
    }
}

/// Drop rows identical to an earlier row, keeping first occurrences in order.
/// Returns the table and the number of rows removed.
pub fn drop_duplicates(mut table: Table) -> (Table, usize) {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(table.row_count());
    let keep: Vec<bool> = (0..table.row_count())
        .map(|idx| {
            let key: Vec<CellKey> = table.row(idx).into_iter().map(CellKey::from).collect();
            seen.insert(key)
        })
        .collect();
    drop(seen);

    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        table.retain_rows(&keep);
    }
    (table, removed)
}
