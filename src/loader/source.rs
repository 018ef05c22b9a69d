//! Spreadsheet sources
//!
//! Rows are deserialized into a fixed record shape and validated as they are
//! read, so a malformed sheet fails before any aggregation or storage work
//! starts. Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with
//! calamine; `.csv` files with the csv crate.

use super::LoadError;
use calamine::{Data, RangeDeserializerBuilder, Reader, open_workbook_auto};
use serde::Deserialize;
use std::path::Path;

pub const WELL_NUMBER_COLUMN: &str = "API WELL  NUMBER";
pub const OIL_COLUMN: &str = "OIL";
pub const GAS_COLUMN: &str = "GAS";
pub const BRINE_COLUMN: &str = "BRINE";

const REQUIRED_COLUMNS: [&str; 4] = [WELL_NUMBER_COLUMN, OIL_COLUMN, GAS_COLUMN, BRINE_COLUMN];

/// One production row from the source sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRow {
    /// Identifier as it appears in the sheet, surrounding whitespace included
    pub well_number: String,
    pub oil: f64,
    pub gas: f64,
    pub brine: f64,
}

/// Row as it comes off the sheet. Empty cells deserialize to `None`.
///
/// Numeric identifier cells arrive as text: calamine renders whole numbers
/// without a fraction (`3400123456`), and CSV fields are taken verbatim.
#[derive(Debug, Deserialize)]
struct SourceRecord {
    #[serde(rename = "API WELL  NUMBER")]
    well_number: Option<String>,
    #[serde(rename = "OIL")]
    oil: Option<f64>,
    #[serde(rename = "GAS")]
    gas: Option<f64>,
    #[serde(rename = "BRINE")]
    brine: Option<f64>,
}

impl SourceRecord {
    fn is_blank(&self) -> bool {
        self.well_number.as_deref().is_none_or(str::is_empty)
            && self.oil.is_none()
            && self.gas.is_none()
            && self.brine.is_none()
    }

    /// Check a non-blank record against the row schema
    fn validate(self, line: usize) -> Result<ProductionRow, LoadError> {
        let well_number = self
            .well_number
            .filter(|well| !well.trim().is_empty())
            .ok_or_else(|| {
                LoadError::DataFormat(format!(
                    "row {}: column '{}' is empty",
                    line, WELL_NUMBER_COLUMN
                ))
            })?;

        Ok(ProductionRow {
            well_number,
            oil: volume(line, OIL_COLUMN, self.oil)?,
            gas: volume(line, GAS_COLUMN, self.gas)?,
            brine: volume(line, BRINE_COLUMN, self.brine)?,
        })
    }
}

fn volume(line: usize, column: &str, value: Option<f64>) -> Result<f64, LoadError> {
    match value {
        None => Err(LoadError::DataFormat(format!(
            "row {}: column '{}' is empty",
            line, column
        ))),
        Some(v) if !v.is_finite() || v < 0.0 => Err(LoadError::DataFormat(format!(
            "row {}: column '{}' must be a non-negative number, got {}",
            line, column, v
        ))),
        Some(v) => Ok(v),
    }
}

/// Header names are matched exactly, including case and inner spacing
fn require_columns<S: AsRef<str>>(headers: &[S]) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.as_ref() == column) {
            return Err(LoadError::DataFormat(format!(
                "missing required column '{}'",
                column
            )));
        }
    }
    Ok(())
}

/// Read every production row from `path`.
///
/// `sheet` selects a worksheet by name for workbook sources and is ignored for CSV.
pub fn read_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<ProductionRow>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceRead(format!(
            "{}: file not found",
            path.display()
        )));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv(path)
    } else {
        read_workbook(path, sheet)
    }
}

fn read_csv(path: &Path) -> Result<Vec<ProductionRow>, LoadError> {
    let source_err = |e: csv::Error| LoadError::SourceRead(format!("{}: {}", path.display(), e));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(source_err)?;

    let headers = reader.headers().map_err(source_err)?.clone();
    require_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2;
        let record = record.map_err(source_err)?;

        let parsed: SourceRecord = record.deserialize(Some(&headers)).map_err(|e| {
            match e.kind() {
                csv::ErrorKind::Deserialize { err, .. } => {
                    let column = err
                        .field()
                        .and_then(|field| headers.get(field as usize))
                        .unwrap_or("?");
                    LoadError::DataFormat(format!(
                        "row {}: column '{}': {}",
                        line,
                        column,
                        err.kind()
                    ))
                }
                _ => LoadError::DataFormat(format!("row {}: {}", line, e)),
            }
        })?;

        if !parsed.is_blank() {
            rows.push(parsed.validate(line)?);
        }
    }

    Ok(rows)
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Vec<ProductionRow>, LoadError> {
    let source_err =
        |e: calamine::Error| LoadError::SourceRead(format!("{}: {}", path.display(), e));

    let mut workbook = open_workbook_auto(path).map_err(source_err)?;

    let range = match sheet {
        Some(name) => workbook.worksheet_range(name).map_err(source_err)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                LoadError::SourceRead(format!("{}: workbook has no worksheets", path.display()))
            })?
            .map_err(source_err)?,
    };

    let headers: Vec<String> = range
        .rows()
        .next()
        .ok_or_else(|| LoadError::DataFormat("worksheet is empty".to_string()))?
        .iter()
        .map(Data::to_string)
        .collect();
    require_columns(&headers)?;

    // Report rows the way a spreadsheet user sees them, offset by the used range
    let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    let records = RangeDeserializerBuilder::with_headers(&REQUIRED_COLUMNS)
        .from_range::<_, SourceRecord>(&range)
        .map_err(|e| LoadError::DataFormat(e.to_string()))?;

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let line = first_row + index + 1;
        let parsed =
            record.map_err(|e| LoadError::DataFormat(format!("row {}: {}", line, e)))?;

        if !parsed.is_blank() {
            rows.push(parsed.validate(line)?);
        }
    }

    Ok(rows)
}
