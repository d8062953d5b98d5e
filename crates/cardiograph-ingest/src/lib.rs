//! Spreadsheet ingestion: pulls the three recognized vitals out of the first
//! data row of an uploaded workbook or CSV file.
//!
//! Headers are trimmed and lowercased before matching, a `patient id` column
//! is ignored, and cells that do not coerce to a number come back as `None`.

use calamine::{open_workbook_auto, Data, Reader};
use cardiograph_core::{CardioError, Result, Vitals};
use std::path::Path;
use tracing::debug;

const HEART_RATE_HEADER: &str = "heart rate";
const BLOOD_PRESSURE_HEADER: &str = "blood pressure";
const STRESS_LEVEL_HEADER: &str = "stress level";

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Read the first data row of the file at `path` and extract vitals.
///
/// Workbook formats are dispatched to calamine, everything else is treated as
/// CSV. Header-only and empty files are ingest errors.
pub fn extract_vitals(path: &Path) -> Result<Vitals> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        extract_from_workbook(path)
    } else {
        extract_from_csv(path)
    }
}

fn extract_from_workbook(path: &Path) -> Result<Vitals> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CardioError::Ingest(format!("failed to open workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CardioError::Ingest("workbook has no sheets".to_string()))?
        .map_err(|e| CardioError::Ingest(format!("failed to read sheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| CardioError::Ingest("spreadsheet has no data rows".to_string()))?
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();

    let first_row = rows
        .next()
        .ok_or_else(|| CardioError::Ingest("spreadsheet has no data rows".to_string()))?;

    let cells: Vec<Option<f64>> = first_row.iter().map(coerce_workbook_cell).collect();
    debug!(columns = headers.len(), "extracted first workbook row");
    Ok(vitals_from_row(&headers, &cells))
}

fn extract_from_csv(path: &Path) -> Result<Vitals> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CardioError::Ingest(format!("failed to open csv: {e}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CardioError::Ingest(format!("failed to read csv headers: {e}")))?
        .iter()
        .map(normalize_header)
        .collect();

    let first_row = reader
        .records()
        .next()
        .ok_or_else(|| CardioError::Ingest("spreadsheet has no data rows".to_string()))?
        .map_err(|e| CardioError::Ingest(format!("failed to read csv row: {e}")))?;

    let cells: Vec<Option<f64>> = first_row.iter().map(coerce_text_cell).collect();
    debug!(columns = headers.len(), "extracted first csv row");
    Ok(vitals_from_row(&headers, &cells))
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Numeric cells pass through; strings are parsed; everything else is `None`.
fn coerce_workbook_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => coerce_text_cell(s),
        _ => None,
    }
}

fn coerce_text_cell(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Map normalized headers onto vitals. The first occurrence of a recognized
/// header wins; unrecognized columns (including `patient id`) are ignored.
fn vitals_from_row(headers: &[String], cells: &[Option<f64>]) -> Vitals {
    let value_for = |name: &str| -> Option<f64> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| cells.get(idx).copied().flatten())
    };

    Vitals {
        heart_rate: value_for(HEART_RATE_HEADER),
        blood_pressure: value_for(BLOOD_PRESSURE_HEADER),
        stress_level: value_for(STRESS_LEVEL_HEADER),
    }
}
