//! Delimited text (CSV / TSV) with encoding and delimiter auto-detection.

use csv::ReaderBuilder;
use serde_json::{Number, Value};

use crate::error::{SpreadsheetError, SpreadsheetResult};

use super::{build_records, ParseResult, SourceFormat};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited bytes with auto-detection of encoding and delimiter.
///
/// Valid UTF-8 is taken as is; chardet only guesses for other bytes.
pub fn parse_bytes_auto(bytes: &[u8]) -> SpreadsheetResult<ParseResult> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (content, encoding) = match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), "utf-8".to_string()),
        Err(_) => {
            let encoding = detect_encoding(bytes);
            (decode_content(bytes, &encoding), encoding)
        }
    };
    let delimiter = detect_delimiter(&content);

    parse_str(&content, delimiter, encoding)
}

/// Parse already-decoded text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> SpreadsheetResult<ParseResult> {
    let delimiter_byte = u8::try_from(delimiter).map_err(|_| {
        SpreadsheetError::Delimited(format!("delimiter '{}' is not a single byte", delimiter))
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<Option<Value>>> = Vec::new();
    for row in reader.records() {
        let row = row?;
        grid.push(row.iter().map(text_cell).collect());
    }

    let (headers, records) = build_records(grid);

    Ok(ParseResult {
        records,
        headers,
        format: SourceFormat::Delimited {
            encoding,
            delimiter,
        },
    })
}

/// Type a text cell the way spreadsheet applications do when opening CSV:
/// numbers and TRUE/FALSE are recognised, everything else stays text.
///
/// Digit strings with a leading zero (phone numbers, postcodes) stay text.
fn text_cell(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }

    let has_leading_zero = trimmed.len() > 1
        && trimmed.starts_with('0')
        && !trimmed.starts_with("0.");
    if !has_leading_zero {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Value::Number(n.into()));
        }
        if trimmed.chars().any(|c| c.is_ascii_digit()) {
            if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                return Some(Value::Number(n));
            }
        }
    }

    Some(Value::String(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content: &str) -> ParseResult {
        parse_bytes_auto(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_simple_csv() {
        let result = parse("nombre,email\nAna,ana@x.com\nLeo,leo@x.com");

        assert_eq!(result.headers, vec!["nombre", "email"]);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0]["nombre"], "Ana");
        assert_eq!(result.records[1]["email"], "leo@x.com");
    }

    #[test]
    fn test_quoted_values_with_delimiter_inside() {
        let result = parse("nombre;nota\n\"Ana\";\"uno; dos\"");

        assert_eq!(result.records[0]["nombre"], "Ana");
        assert_eq!(result.records[0]["nota"], "uno; dos");
    }

    #[test]
    fn test_empty_cells_and_rows_are_dropped() {
        let result = parse("a,b,c\n1,,3\n,,\n4,5,6\n");

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].len(), 2);
        assert!(!result.records[0].contains_key("b"));
        assert_eq!(result.records[1]["b"], 5);
    }

    #[test]
    fn test_cell_typing() {
        let result = parse("n,f,b,phone,t\n30,2.5,TRUE,0612345678,hola");
        let record = &result.records[0];

        assert_eq!(record["n"], json!(30));
        assert_eq!(record["f"], json!(2.5));
        assert_eq!(record["b"], json!(true));
        assert_eq!(record["phone"], json!("0612345678"));
        assert_eq!(record["t"], json!("hola"));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let result = parse("nombre,email\n");
        assert_eq!(result.headers, vec!["nombre", "email"]);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_accented_utf8_is_not_redecoded() {
        for name in ["Iñaki", "Óscar", "Müller", "José", "Begoña", "Zoë"] {
            let content = format!("nombre,email\n{},x@x.com\n", name);
            let result = parse(&content);

            assert_eq!(result.records[0]["nombre"], name);
            assert!(matches!(
                result.format,
                SourceFormat::Delimited { ref encoding, .. } if encoding == "utf-8"
            ));
        }
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let result = parse("\u{FEFF}nombre,email\nAna,ana@x.com");
        assert_eq!(result.headers[0], "nombre");
    }
}
