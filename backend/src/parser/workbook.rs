//! Binary workbooks (xlsx, xlsm, xlsb, xls, ods) via calamine.

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use serde_json::{Number, Value};
use std::io::Cursor;

use crate::error::{SpreadsheetError, SpreadsheetResult};

use super::{build_records, ParseResult, SourceFormat};

/// ZIP container (xlsx, xlsm, xlsb, ods).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE2 compound document (legacy xls).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Whether the bytes look like a binary workbook container.
pub fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC)
}

/// Read the first sheet (by position) of a workbook.
pub fn parse_first_sheet(bytes: &[u8]) -> SpreadsheetResult<ParseResult> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheets)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheets)??;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    let (headers, records) = build_records(grid);

    Ok(ParseResult {
        records,
        headers,
        format: SourceFormat::Workbook { sheet },
    })
}

/// Convert one cell. `None` means the cell is empty and is left out of the record.
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::Number((*i).into())),
        Data::Float(f) => Some(float_value(*f)),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(_) => Some(Value::String(
            cell.as_datetime()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| cell.to_string()),
        )),
        other => Some(Value::String(other.to_string())),
    }
}

/// Spreadsheets store every number as a float; whole numbers come back as integers.
fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Value::Number((f as i64).into());
    }
    Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(f.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use serde_json::json;

    fn xlsx(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    sheet.write_string(r as u32, c as u16, *cell).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_detects_workbook_containers() {
        assert!(is_workbook(&xlsx(&[&["a"]])));
        assert!(is_workbook(OLE_MAGIC));
        assert!(!is_workbook(b"nombre,email\n"));
    }

    #[test]
    fn test_first_sheet_rows_become_records() {
        let bytes = xlsx(&[
            &["nombre", "email"],
            &["Ana", "ana@x.com"],
            &["Leo", "leo@x.com"],
        ]);

        let result = parse_first_sheet(&bytes).unwrap();

        assert_eq!(result.headers, vec!["nombre", "email"]);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0]["nombre"], "Ana");
        assert_eq!(result.records[1]["email"], "leo@x.com");
        assert!(matches!(result.format, SourceFormat::Workbook { ref sheet } if sheet == "Sheet1"));
    }

    #[test]
    fn test_only_first_sheet_is_read() {
        let mut workbook = Workbook::new();
        workbook
            .add_worksheet()
            .set_name("Primera")
            .unwrap()
            .write_string(0, 0, "nombre")
            .unwrap()
            .write_string(1, 0, "Ana")
            .unwrap();
        workbook
            .add_worksheet()
            .set_name("Segunda")
            .unwrap()
            .write_string(0, 0, "otro")
            .unwrap()
            .write_string(1, 0, "x")
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let result = parse_first_sheet(&bytes).unwrap();

        assert_eq!(result.records, vec![json!({"nombre": "Ana"}).as_object().unwrap().clone()]);
    }

    #[test]
    fn test_numbers_and_booleans_keep_their_type() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "edad").unwrap();
        sheet.write_string(0, 1, "saldo").unwrap();
        sheet.write_string(0, 2, "activo").unwrap();
        sheet.write_number(1, 0, 30.0).unwrap();
        sheet.write_number(1, 1, 12.5).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let result = parse_first_sheet(&bytes).unwrap();
        let record = &result.records[0];

        assert_eq!(record["edad"], json!(30));
        assert_eq!(record["saldo"], json!(12.5));
        assert_eq!(record["activo"], json!(true));
    }

    #[test]
    fn test_empty_sheet_yields_no_records() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let result = parse_first_sheet(&bytes).unwrap();

        assert!(result.records.is_empty());
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_corrupt_workbook_is_an_error() {
        let mut bytes = ZIP_MAGIC.to_vec();
        bytes.extend_from_slice(b"definitely not a zip archive");

        let err = parse_first_sheet(&bytes).unwrap_err();
        assert!(matches!(err, SpreadsheetError::Workbook(_)));
    }

    #[test]
    fn test_dates_are_rendered_as_text() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        sheet.write_string(0, 0, "alta").unwrap();
        sheet
            .write_datetime_with_format(
                1,
                0,
                &ExcelDateTime::from_ymd(2024, 3, 5).unwrap(),
                &date_format,
            )
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let result = parse_first_sheet(&bytes).unwrap();

        assert_eq!(result.records[0]["alta"], json!("2024-03-05 00:00:00"));
    }

    #[test]
    fn test_float_value() {
        assert_eq!(float_value(3.0), json!(3));
        assert_eq!(float_value(0.25), json!(0.25));
    }
}
