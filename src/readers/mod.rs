pub mod csv;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Error;
use crate::table::Table;
use crate::types::{FileFormat, Result};

/// Text encoding the input was decoded with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum SourceEncoding {
    Utf8,
    Fallback(String),
}

/// A freshly loaded table plus how it was decoded
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub encoding: SourceEncoding,
}

/// Format implied by a path's extension
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    FileFormat::from_extension(ext).ok_or_else(|| {
        Error::UnsupportedFormat(format!("Unsupported file extension: .{}", ext))
    })
}

/// Resolve an input location: a file is used as is, a directory yields its
/// first delimited file in name order
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|e| Error::read(path, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && detect_format(p).is_ok())
        .collect();
    candidates.sort();

    let chosen = candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoInput(path.to_path_buf()))?;
    info!(path = %chosen.display(), "using raw file");
    Ok(chosen)
}

/// Load a delimited file, retrying with `fallback_encoding` if it is not UTF-8
pub fn load_table(path: &Path, fallback_encoding: &str) -> Result<LoadedTable> {
    let reader = match detect_format(path)? {
        FileFormat::Csv => csv::CsvReader::new(path),
        FileFormat::Tsv => csv::CsvReader::new_tsv(path),
    };
    reader.read(fallback_encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_directory_picks_first_csv() {
        let dir = tempdir().unwrap();
        for name in ["b.csv", "a.csv", "notes.md"] {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, "x").unwrap();
        }

        let chosen = resolve_input(dir.path()).unwrap();
        assert_eq!(chosen.file_name().unwrap(), "a.csv");
    }

    #[test]
    fn test_resolve_empty_directory_fails() {
        let dir = tempdir().unwrap();
        let err = resolve_input(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoInput(_)));
    }

    #[test]
    fn test_resolve_file_passthrough() {
        let path = Path::new("data/raw/patients.csv");
        assert_eq!(resolve_input(path).unwrap(), path);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = detect_format(Path::new("records.xlsx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
