use serde::Serialize;
use tracing::debug;

use crate::stats::median;
use crate::table::{Table, Value};
use crate::types::DType;

/// What the imputer did to one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputedColumn {
    pub column: String,
    pub fill: String,
    pub filled: usize,
}

/// Fill numeric gaps with the column median and text gaps with `text_fill`.
/// Temporal columns and numeric columns without any value stay missing.
pub fn impute(mut table: Table, text_fill: &str) -> (Table, Vec<ImputedColumn>) {
    let mut outcomes = Vec::new();
    for column in table.columns_mut() {
        let missing = column.missing_count();
        if missing == 0 {
            continue;
        }

        let fill = match column.dtype {
            DType::Numeric => match median(&column.numbers()) {
                Some(m) => Value::Number(m),
                None => {
                    debug!(column = %column.name, "numeric column entirely missing; left as is");
                    continue;
                }
            },
            DType::Text => Value::Text(text_fill.to_string()),
            DType::Temporal => continue,
        };

        for value in column.values.iter_mut().filter(|v| v.is_missing()) {
            *value = fill.clone();
        }
        outcomes.push(ImputedColumn {
            column: column.name.clone(),
            fill: fill.to_string(),
            filled: missing,
        });
    }
    (table, outcomes)
}
