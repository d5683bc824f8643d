//! Quote-aware CSV reader for NCCS efile tables
//!
//! The efile exports are not strict RFC 4180: quotes are only treated as
//! delimiters when they sit at a field boundary, and embedded quotes are kept
//! verbatim. Rows whose field count differs from the header are skipped and
//! counted rather than failing the whole table.

use std::collections::HashMap;
use tracing::debug;

/// Header substrings that mark a numeric column
const NUMERIC_HEADER_MARKERS: [&str; 5] = ["REVENUE", "ASSETS", "EXPENSES", "INCOME", "GRANTS"];

/// A single coerced cell
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Number(f64),
    Text(String),
}

/// One data row keyed by header name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRow {
    fields: HashMap<String, CsvValue>,
}

impl CsvRow {
    pub fn from_fields(fields: HashMap<String, CsvValue>) -> Self {
        Self { fields }
    }

    /// Text value of a column; empty when absent or numeric
    pub fn text(&self, column: &str) -> &str {
        match self.fields.get(column) {
            Some(CsvValue::Text(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Numeric value of a column; zero when absent or textual
    pub fn number(&self, column: &str) -> f64 {
        match self.fields.get(column) {
            Some(CsvValue::Number(n)) => *n,
            _ => 0.0,
        }
    }

    pub fn get(&self, column: &str) -> Option<&CsvValue> {
        self.fields.get(column)
    }
}

/// Parsed table plus the number of malformed rows that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
    pub skipped_rows: usize,
}

/// Whether a column is coerced to a number
pub fn is_numeric_column(header: &str) -> bool {
    header == "TAX_YEAR" || NUMERIC_HEADER_MARKERS.iter().any(|m| header.contains(m))
}

/// Parse CSV text into rows keyed by the header line
///
/// `max_records` caps the number of data lines examined; the header line is
/// never counted. Blank lines are ignored entirely.
pub fn parse_csv(content: &str, max_records: Option<usize>) -> CsvTable {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return CsvTable::default();
    };

    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.replace('"', "").trim().to_string())
        .collect();

    let limit = max_records.map_or(data_lines.len(), |cap| cap.min(data_lines.len()));
    let mut rows = Vec::with_capacity(limit);
    let mut skipped_rows = 0;

    for (index, line) in data_lines[..limit].iter().enumerate() {
        let values = split_line(line);
        if values.len() != headers.len() {
            debug!(
                line = index + 2,
                expected = headers.len(),
                found = values.len(),
                "Skipping malformed CSV row"
            );
            skipped_rows += 1;
            continue;
        }

        let fields = headers
            .iter()
            .zip(values)
            .map(|(header, value)| {
                let cell = if is_numeric_column(header) {
                    CsvValue::Number(parse_number(&value))
                } else {
                    CsvValue::Text(value)
                };
                (header.clone(), cell)
            })
            .collect();
        rows.push(CsvRow::from_fields(fields));
    }

    CsvTable {
        headers,
        rows,
        skipped_rows,
    }
}

/// Split one line on commas, honoring boundary quotes
///
/// A quote opens a quoted field at line start or right after a comma, and
/// closes it right before a comma or at line end. Fields are trimmed.
pub fn split_line(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for (i, &c) in chars.iter().enumerate() {
        let at_field_start = i == 0 || chars[i - 1] == ',';
        let at_field_end = i + 1 == chars.len() || chars[i + 1] == ',';

        if c == '"' && at_field_start {
            in_quotes = true;
        } else if c == '"' && in_quotes && at_field_end {
            in_quotes = false;
        } else if c == ',' && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Lenient float parse: longest numeric prefix, zero when there is none
fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
