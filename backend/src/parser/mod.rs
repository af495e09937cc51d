//! Spreadsheet to record conversion.
//!
//! Uploaded bytes are sniffed: workbook containers go through calamine
//! ([`workbook`]), everything else is read as delimited text ([`delimited`]).
//! Either way the first row names the columns and every following row becomes
//! a [`Record`]. No contact-specific logic here: headers pass through as-is.

pub mod delimited;
pub mod workbook;

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::SpreadsheetResult;
use crate::models::Record;

pub use delimited::{decode_content, detect_delimiter, detect_encoding};
pub use workbook::is_workbook;

/// Where the records came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceFormat {
    /// A binary workbook; only the named first sheet was read.
    Workbook { sheet: String },
    /// CSV-like text.
    Delimited { encoding: String, delimiter: char },
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One record per non-blank data row
    pub records: Vec<Record>,
    /// Column headers, after empty/duplicate renaming
    pub headers: Vec<String>,
    pub format: SourceFormat,
}

/// Parse uploaded bytes into records.
pub fn parse_bytes(bytes: &[u8]) -> SpreadsheetResult<ParseResult> {
    if is_workbook(bytes) {
        workbook::parse_first_sheet(bytes)
    } else {
        delimited::parse_bytes_auto(bytes)
    }
}

/// Read a file from disk and parse it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> SpreadsheetResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

/// Name the columns from the first row and turn the remaining rows into records.
///
/// Empty cells are left out of their record and rows without any value are
/// skipped. Columns past the last non-empty cell of the whole grid are ignored.
pub(crate) fn build_records(grid: Vec<Vec<Option<Value>>>) -> (Vec<String>, Vec<Record>) {
    let width = grid
        .iter()
        .filter_map(|row| row.iter().rposition(Option::is_some))
        .map(|last| last + 1)
        .max()
        .unwrap_or(0);

    if width == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut rows = grid.into_iter();
    let header_cells = rows.next().unwrap_or_default();
    let headers = header_names(&header_cells, width);

    let records = rows
        .filter_map(|row| {
            let record: Record = headers
                .iter()
                .zip(row)
                .filter_map(|(header, cell)| cell.map(|value| (header.clone(), value)))
                .collect();
            (!record.is_empty()).then_some(record)
        })
        .collect();

    (headers, records)
}

/// Header text for each column. Blank headers become `__EMPTY`, repeated
/// names get a `_1`, `_2`, ... suffix.
fn header_names(cells: &[Option<Value>], width: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(width);

    for i in 0..width {
        let base = match cells.get(i).and_then(Option::as_ref) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let base = if base.is_empty() { "__EMPTY".to_string() } else { base };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Option<Value> {
        Some(Value::String(s.to_string()))
    }

    #[test]
    fn test_header_renaming() {
        let cells = vec![text("email"), None, text("email"), text(""), text("email")];
        let names = header_names(&cells, 5);

        assert_eq!(names, vec!["email", "__EMPTY", "email_1", "__EMPTY_1", "email_2"]);
    }

    #[test]
    fn test_numeric_headers_are_stringified() {
        let names = header_names(&[Some(json!(2024))], 1);
        assert_eq!(names, vec!["2024"]);
    }

    #[test]
    fn test_data_past_last_header_gets_empty_name() {
        let grid = vec![
            vec![text("nombre")],
            vec![text("Ana"), text("extra")],
        ];
        let (headers, records) = build_records(grid);

        assert_eq!(headers, vec!["nombre", "__EMPTY"]);
        assert_eq!(records[0]["__EMPTY"], "extra");
    }

    #[test]
    fn test_all_blank_grid() {
        let (headers, records) = build_records(vec![vec![None, None], vec![None]]);
        assert!(headers.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_bytes_dispatches_on_content() {
        let result = parse_bytes(b"nombre,email\nAna,ana@x.com").unwrap();
        assert!(matches!(result.format, SourceFormat::Delimited { delimiter: ',', .. }));
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contactos.csv");
        std::fs::write(&path, "nombre;email\nAna;ana@x.com\nLeo;leo@x.com\n").unwrap();

        let result = parse_file(&path).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1]["nombre"], "Leo");
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/contactos.xlsx").unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
