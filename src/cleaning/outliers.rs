use tracing::debug;

use crate::roles::RoleMap;
use crate::stats::Quartiles;
use crate::table::{Table, Value};
use crate::types::{DType, Role};

/// Outcome of capping one column
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CappedColumn {
    pub column: String,
    pub lower: f64,
    pub upper: f64,
    pub capped: usize,
}

/// Clamp numeric columns (identifiers excluded) to their Tukey fences.
/// Columns with fewer than `min_values` present values are left alone.
pub fn cap_outliers(
    mut table: Table,
    roles: &RoleMap,
    multiplier: f64,
    min_values: usize,
) -> (Table, Vec<CappedColumn>) {
    let mut outcomes = Vec::new();
    for column in table.columns_mut() {
        if column.dtype != DType::Numeric || roles.has_role(&column.name, Role::Identifier) {
            continue;
        }
        let present = column.numbers();
        if present.is_empty() || present.len() < min_values {
            debug!(column = %column.name, values = present.len(), "too few values to cap");
            continue;
        }
        let Some(quartiles) = Quartiles::of(&present) else {
            continue;
        };
        let (lower, upper) = quartiles.fences(multiplier);
        if lower.is_nan() || upper.is_nan() || lower > upper {
            debug!(column = %column.name, lower, upper, "fences do not form a range; skipped");
            continue;
        }

        let mut capped = 0;
        for value in column.values.iter_mut() {
            if let Value::Number(n) = value {
                let clamped = n.clamp(lower, upper);
                if clamped != *n {
                    *n = clamped;
                    capped += 1;
                }
            }
        }
        outcomes.push(CappedColumn {
            column: column.name.clone(),
            lower,
            upper,
            capped,
        });
    }
    (table, outcomes)
}
