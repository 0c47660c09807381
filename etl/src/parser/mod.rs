//! CSV parsing with encoding and delimiter auto-detection.
//!
//! Turns raw source bytes into a [`RawTable`]: the header row exactly as
//! written and one row of optional text cells per record. No type coercion
//! happens here; an empty cell or one of [`DEFAULT_NA_VALUES`] is a missing
//! value.

use csv::ReaderBuilder;
use serde::Serialize;

use crate::error::{ExtractError, ExtractResult};

/// Number of leading bytes handed to chardet when the input is not UTF-8.
const ENCODING_SAMPLE_BYTES: usize = 64 * 1024;

/// Cell texts read as missing values. Matched exactly, case and
/// surrounding whitespace included.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Cell text to an optional value.
pub fn cell_value(cell: &str) -> Option<String> {
    if DEFAULT_NA_VALUES.contains(&cell) {
        None
    } else {
        Some(cell.to_string())
    }
}

/// In-memory source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// One entry per data row, always `headers.len()` cells wide.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: RawTable,
    pub info: SourceInfo,
}

/// What the parser detected about the source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 short-circuits; otherwise chardet looks at a leading sample.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let sample = &bytes[..bytes.len().min(ENCODING_SAMPLE_BYTES)];
    let charset = chardet::detect(sample).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Latin-1 is decoded with the WHATWG `windows-1252` table, which agrees
/// with ISO-8859-1 on 0xA0-0xFF. Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when the header contains none of the candidates.
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

/// Parse CSV text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char) -> ExtractResult<RawTable> {
    if content.trim().is_empty() {
        return Err(ExtractError::EmptySource);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ExtractError::NoHeaders);
    }

    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(cell_value).collect());
    }

    Ok(table)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> ExtractResult<ParseResult> {
    if bytes.is_empty() {
        return Err(ExtractError::EmptySource);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let table = parse_str(&content, delimiter)?;

    let info = SourceInfo {
        encoding,
        delimiter,
        headers: table.headers.clone(),
        row_count: table.len(),
    };

    Ok(ParseResult { table, info })
}
