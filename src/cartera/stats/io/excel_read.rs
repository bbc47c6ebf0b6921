use std::collections::HashSet;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::cartera::stats::error::{Result, ToolError};
use crate::cartera::stats::model::{CellValue, Row};

/// Reads the first worksheet of the workbook at `path` into rows keyed by the
/// header row.
///
/// No schema validation is performed: a missing column simply leaves the key
/// out of every row. Rows without a single non-blank cell are skipped.
///
/// When several columns share a header, only the leftmost one is read; a
/// blank cell there leaves the field absent even if a later duplicate holds a
/// value.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let range = read_first_sheet(path)?;
    let headers = header_row(&range);
    let fields = field_columns(&headers);

    let mut rows = Vec::new();
    for cells in range.rows().skip(1) {
        let mut row = Row::new();
        for (col_idx, cell) in cells.iter().enumerate() {
            let Some(Some(header)) = fields.get(col_idx) else {
                continue;
            };
            let value = cell_to_value(cell);
            if value.is_blank() {
                continue;
            }
            row.insert(*header, value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    debug!(row_count = rows.len(), column_count = headers.len(), "first sheet read");
    Ok(rows)
}

/// Returns the header row of the first worksheet.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let range = read_first_sheet(path)?;
    Ok(header_row(&range))
}

fn read_first_sheet(path: &Path) -> Result<Range<DataType>> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".into()))?;
    debug!(sheet = %name, "reading first sheet");

    let range = workbook
        .worksheet_range(&name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))??;
    Ok(range)
}

fn header_row(range: &Range<DataType>) -> Vec<String> {
    match range.rows().next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_value(cell).to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// Maps each column to the header it feeds, or `None` for unnamed columns
/// and repeats of an earlier header.
fn field_columns(headers: &[String]) -> Vec<Option<&str>> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|header| {
            let header = header.as_str();
            (!header.is_empty() && seen.insert(header)).then_some(header)
        })
        .collect()
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::DateTime(value) | DataType::Duration(value) => CellValue::Number(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}
