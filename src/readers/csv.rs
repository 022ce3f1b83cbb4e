use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::{info, warn};

use crate::error::Error;
use crate::table::Table;
use crate::types::Result;

use super::{LoadedTable, SourceEncoding};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b',',
        }
    }

    /// Create a new TSV reader
    pub fn new_tsv(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        }
    }

    /// Read the whole file into a text table
    pub fn read(&self, fallback_encoding: &str) -> Result<LoadedTable> {
        let bytes = fs::read(&self.path).map_err(|e| Error::read(&self.path, e))?;
        let (text, encoding) = self.decode(&bytes, fallback_encoding)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::csv(&self.path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| Error::csv(&self.path, e))?;
            records.push(record.iter().map(|f| f.to_string()).collect());
        }

        let table = Table::from_records(headers, records);
        info!(
            path = %self.path.display(),
            rows = table.row_count(),
            columns = table.columns().len(),
            ?encoding,
            "loaded raw table"
        );

        Ok(LoadedTable {
            table,
            encoding,
        })
    }

    fn decode(&self, bytes: &[u8], fallback_label: &str) -> Result<(String, SourceEncoding)> {
        let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
        if let Ok(text) = std::str::from_utf8(body) {
            return Ok((text.to_string(), SourceEncoding::Utf8));
        }

        let encoding = Encoding::for_label(fallback_label.as_bytes()).ok_or_else(|| {
            Error::Config(format!("unknown fallback encoding '{}'", fallback_label))
        })?;
        warn!(
            path = %self.path.display(),
            encoding = encoding.name(),
            "input is not valid UTF-8; retrying with fallback encoding"
        );

        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| {
                (
                    text.into_owned(),
                    SourceEncoding::Fallback(encoding.name().to_string()),
                )
            })
            .ok_or_else(|| Error::Decode {
                path: self.path.clone(),
                encoding: encoding.name().to_string(),
            })
    }
}
