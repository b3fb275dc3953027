use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, warn};

use crate::libreg::tools::error::{Result, ToolError};
use crate::libreg::tools::model::{DefinedName, SheetTable};

/// Lists the workbook-level defined names of the workbook at `path`.
pub fn defined_names(path: &Path) -> Result<Vec<DefinedName>> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    let names = workbook
        .defined_names()
        .iter()
        .map(|(name, formula)| DefinedName {
            name: name.clone(),
            formula: formula.clone(),
        })
        .collect();
    Ok(names)
}

/// Loads the first sheet in workbook order as rendered cell text.
///
/// Workbooks with several sheets are read the same way; the other sheet
/// names are logged because the first one is not guaranteed to hold the data.
pub fn read_first_sheet(path: &Path) -> Result<SheetTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".into()))?;
    if sheet_names.len() > 1 {
        warn!(
            sheet = %sheet_name,
            ignored = ?&sheet_names[1..],
            "workbook has several sheets; exporting the first one"
        );
    }

    let range = read_sheet_at(&mut workbook, 0)?;
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .collect();
    debug!(sheet = %sheet_name, rows = rows.len(), "sheet loaded");

    Ok(SheetTable { sheet_name, rows })
}

fn read_sheet_at<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    index: usize,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range_at(index)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet #{index}")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => float_to_string(*value),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(cell @ DataType::DateTime(serial)) => cell
            .as_datetime()
            .map(|datetime| datetime.format(DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| float_to_string(*serial)),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// Excel stores every number as a float; whole values print as integers.
fn float_to_string(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
