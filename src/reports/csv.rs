//! CSV rendering for report rows

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to render CSV: {0}")]
    Render(String),
}

/// Render uniform rows as CSV: a header line from the field names, then
/// one comma-joined line per row. Fields containing a comma or quote are
/// quoted with embedded quotes doubled; absent values render as the empty
/// string. An empty row set renders as an empty string.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, CsvError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CsvError::Render(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Render(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| CsvError::Render(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}
