use std::path::Path;

use csv::ReaderBuilder;

use crate::error::IngestError;

/// A source extract as read from disk: one header row and text cells.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

// Cells keep their whitespace: trimming is a cleansing rule, not an
// ingestion concern.
fn normalize_cell(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

/// Read a comma separated extract whose first row is the header.
///
/// Blank lines are skipped and short rows are padded with empty cells.
///
/// # Errors
///
/// Returns [`IngestError::MissingSource`] if the file does not exist and
/// [`IngestError::Csv`] on read failures.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    if !path.is_file() {
        return Err(IngestError::MissingSource {
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record.map_err(csv_error)?.iter().map(normalize_header).collect(),
        None => return Ok(CsvTable::default()),
    };
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).map(normalize_cell).unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}
