use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

use crate::types::DType;

/// A single cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; its flavour follows the owning column's dtype
    Missing,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Whole numbers are written without a trailing ".0"
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A named, typed column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: DType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, DType::Text, values)
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing numeric values in row order
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }

    /// Render every cell for export, picking a date-only layout when no time of day is present
    pub fn rendered(&self) -> Vec<String> {
        let date_only = self.dtype == DType::Temporal
            && self
                .values
                .iter()
                .filter_map(Value::as_datetime)
                .all(|dt| dt.time() == NaiveTime::MIN);

        self.values
            .iter()
            .map(|v| match v {
                Value::DateTime(dt) if date_only => dt.format("%Y-%m-%d").to_string(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Column-major table threaded through the cleaning stages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a text table from a header row and raw records.
    /// Short records are padded with empty cells; surplus fields are dropped.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let row_count = records.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::text(h, Vec::with_capacity(row_count)))
            .collect();

        for record in records {
            for (idx, column) in columns.iter_mut().enumerate() {
                let cell = record.get(idx).cloned().unwrap_or_default();
                column.values.push(Value::Text(cell));
            }
        }

        Self { columns, row_count }
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map_or(0, |c| c.values.len());
        debug_assert!(columns.iter().all(|c| c.values.len() == row_count));
        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Cells of one row, in column order
    pub fn row(&self, idx: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[idx]).collect()
    }

    /// Keep rows whose flag is true, preserving order; row positions are renumbered from zero
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.row_count);
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.values.retain(|_| *flags.next().unwrap_or(&false));
        }
        self.row_count = keep.iter().filter(|k| **k).count();
    }
}
