use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::Error;
use crate::readers::detect_format;
use crate::report::MissingReport;
use crate::table::Table;
use crate::types::{FileFormat, Result};

/// Create the parent directory of `path` if needed, then open it for writing
fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    Ok(BufWriter::new(file))
}

/// Write the cleaned table; the delimiter follows the path's extension
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let delimiter = detect_format(path)
        .map(FileFormat::delimiter)
        .unwrap_or(b',');
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(create_file(path)?);

    writer
        .write_record(table.column_names())
        .map_err(|e| Error::csv(path, e))?;
    let rendered: Vec<Vec<String>> = table.columns().iter().map(|c| c.rendered()).collect();
    for row in 0..table.row_count() {
        writer
            .write_record(rendered.iter().map(|column| column[row].as_str()))
            .map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

/// Write a missing-value report as CSV
pub fn write_report(report: &MissingReport, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(create_file(path)?);

    writer
        .write_record(["column", "missing_count", "missing_pct"])
        .map_err(|e| Error::csv(path, e))?;
    for entry in &report.entries {
        writer
            .write_record([
                entry.column.clone(),
                entry.missing_count.to_string(),
                entry.missing_pct.to_string(),
            ])
            .map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

/// Write any serializable value to a pretty JSON file
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut writer = create_file(path)?;
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| Error::write(path, e.into()))?;
    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

/// Write any serializable value to stdout as pretty JSON
pub fn write_json_stdout<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).map_err(|e| Error::write("<stdout>", e))?;
    Ok(())
}
