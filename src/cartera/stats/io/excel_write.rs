use std::path::Path;

use rust_xlsxwriter::{Table, Workbook, Worksheet};

use crate::cartera::stats::error::Result;
use crate::cartera::stats::tally::{CrossSellSummary, MotiveTally};

/// Sheet holding the reason → count table.
pub const MOTIVES_SHEET: &str = "Motivos";
/// Sheet holding the cross-selling figures.
pub const CROSS_SELL_SHEET: &str = "Cross-selling";

/// Writes both tallies into a new workbook at `path`.
pub fn write_report(path: &Path, motives: &MotiveTally, summary: &CrossSellSummary) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(MOTIVES_SHEET)?;
    write_header(worksheet, &["Motivo", "Pólizas"])?;
    for (row_idx, (reason, count)) in motives.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, reason)?;
        worksheet.write_number(row, 1, count as f64)?;
    }
    add_table(worksheet, motives.len(), 2)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(CROSS_SELL_SHEET)?;
    write_header(worksheet, &["Métrica", "Valor"])?;
    let figures = [
        ("Clientes mono-producto", Some(summary.single_product as f64)),
        ("Clientes multi-producto", Some(summary.multi_product as f64)),
        ("Total clientes", Some(summary.total_clients() as f64)),
        ("Ratio Multi-producto (%)", summary.percentage()),
    ];
    for (row_idx, (label, value)) in figures.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        worksheet.write_string(row, 0, *label)?;
        match value {
            Some(value) => worksheet.write_number(row, 1, *value)?,
            None => worksheet.write_string(row, 1, "N/A")?,
        };
    }
    add_table(worksheet, figures.len(), 2)?;

    workbook.save(path)?;
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, columns: &[&str]) -> Result<()> {
    for (col_idx, header) in columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }
    Ok(())
}

fn add_table(worksheet: &mut Worksheet, row_count: usize, column_count: u16) -> Result<()> {
    // Excel tables need at least one data row.
    if row_count == 0 {
        return Ok(());
    }
    let mut table = Table::new();
    table.set_autofilter(true);
    worksheet.add_table(0, 0, row_count as u32, column_count - 1, &table)?;
    Ok(())
}
