use std::path::Path;

use tracing::{debug, info, instrument};

use crate::cartera::stats::error::Result;
use crate::cartera::stats::io::{excel_read, excel_write};
use crate::cartera::stats::model::{ColumnMap, Row};
use crate::cartera::stats::tally::{CrossSellSummary, CrossSellTally, MotiveTally};

/// Outcome of one pass over a policy listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Number of non-blank data rows read from the sheet.
    pub row_count: usize,
    pub motives: MotiveTally,
    pub cross_sell: CrossSellSummary,
}

impl Analysis {
    /// Runs both tallies over rows already in memory.
    pub fn from_rows(rows: &[Row], columns: &ColumnMap) -> Self {
        let motives = MotiveTally::from_rows(rows, columns);
        let clients = CrossSellTally::from_rows(rows, columns);
        debug!(
            reason_count = motives.len(),
            client_count = clients.client_count(),
            "tallies computed"
        );
        Self {
            row_count: rows.len(),
            motives,
            cross_sell: clients.summary(),
        }
    }
}

/// Reads the first sheet of `input` and tallies it.
///
/// Nothing is returned unless the whole workbook was read, so callers never
/// print a partial report.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn analyse(input: &Path, columns: &ColumnMap) -> Result<Analysis> {
    let rows = excel_read::read_rows(input)?;
    info!(row_count = rows.len(), "read rows from workbook");
    let analysis = Analysis::from_rows(&rows, columns);
    info!(
        cancelled = analysis.motives.total(),
        clients = analysis.cross_sell.total_clients(),
        "analysis complete"
    );
    Ok(analysis)
}

/// Saves the tallies of `analysis` as a workbook.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn export(analysis: &Analysis, output: &Path) -> Result<()> {
    excel_write::write_report(output, &analysis.motives, &analysis.cross_sell)?;
    debug!("report workbook saved");
    Ok(())
}
