use std::io::Write;

use serde::Serialize;

use crate::cartera::stats::analysis::Analysis;
use crate::cartera::stats::error::Result;
use crate::cartera::stats::tally::{CrossSellSummary, MotiveTally};

/// Rendering used for reports written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Motive tally as an indented JSON object followed by plain text lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Serialize)]
struct CrossSellFigures {
    mono_producto: u64,
    multi_producto: u64,
    total_clientes: u64,
    ratio_multi_producto: Option<f64>,
}

impl From<&CrossSellSummary> for CrossSellFigures {
    fn from(summary: &CrossSellSummary) -> Self {
        Self {
            mono_producto: summary.single_product,
            multi_producto: summary.multi_product,
            total_clientes: summary.total_clients(),
            ratio_multi_producto: summary
                .percentage()
                .map(|percentage| (percentage * 100.0).round() / 100.0),
        }
    }
}

#[derive(Serialize)]
struct FullReport<'a> {
    motivos: &'a MotiveTally,
    cross_selling: CrossSellFigures,
}

/// Writes both tallies.
pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => {
            write_motives(out, &analysis.motives)?;
            write_cross_sell(out, &analysis.cross_sell, format)
        }
        ReportFormat::Json => {
            let report = FullReport {
                motivos: &analysis.motives,
                cross_selling: CrossSellFigures::from(&analysis.cross_sell),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Writes the reason → count mapping as an indented JSON object.
pub fn write_motives<W: Write>(out: &mut W, motives: &MotiveTally) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, motives)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_cross_sell<W: Write>(
    out: &mut W,
    summary: &CrossSellSummary,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => {
            writeln!(out, "Clientes mono-producto: {}", summary.single_product)?;
            writeln!(out, "Clientes multi-producto: {}", summary.multi_product)?;
            writeln!(out, "Total clientes: {}", summary.total_clients())?;
            writeln!(out, "Ratio Multi-producto: {}", format_percentage(summary.percentage()))?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &CrossSellFigures::from(summary))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Two-decimal percentage, or `N/A` when there is nothing to divide by.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("{value:.2}%"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartera::stats::tally::CrossSellTally;

    fn sample_analysis() -> Analysis {
        let mut motives = MotiveTally::default();
        motives.record("Impago");
        motives.record("Impago");
        motives.record("Error");

        let mut clients = CrossSellTally::default();
        clients.record("A1", Some("Auto".into()));
        clients.record("A1", Some("Vida".into()));
        clients.record("B2", Some("Auto".into()));

        Analysis {
            row_count: 3,
            motives,
            cross_sell: clients.summary(),
        }
    }

    fn render(analysis: &Analysis, format: ReportFormat) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, analysis, format).expect("report written");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn text_report_prints_motives_then_ratio_lines() {
        let output = render(&sample_analysis(), ReportFormat::Text);

        let expected = "{\n  \"Error\": 1,\n  \"Impago\": 2\n}\n\
                        Clientes mono-producto: 1\n\
                        Clientes multi-producto: 1\n\
                        Total clientes: 2\n\
                        Ratio Multi-producto: 50.00%\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_input_reports_not_available() {
        let analysis = Analysis::default();
        let output = render(&analysis, ReportFormat::Text);

        assert!(output.starts_with("{}\n"));
        assert!(output.ends_with("Ratio Multi-producto: N/A\n"));
    }

    #[test]
    fn json_report_rounds_ratio_to_two_decimals() {
        let mut clients = CrossSellTally::default();
        clients.record("A1", Some("Auto".into()));
        clients.record("A1", Some("Vida".into()));
        clients.record("B2", Some("Auto".into()));
        clients.record("C3", Some("Hogar".into()));
        let analysis = Analysis {
            row_count: 4,
            motives: MotiveTally::default(),
            cross_sell: clients.summary(),
        };

        let output = render(&analysis, ReportFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert_eq!(parsed["cross_selling"]["ratio_multi_producto"], serde_json::json!(33.33));
        assert_eq!(parsed["cross_selling"]["total_clientes"], serde_json::json!(3));
        assert_eq!(parsed["motivos"], serde_json::json!({}));
    }

    #[test]
    fn json_cross_sell_without_clients_is_null() {
        let mut buffer = Vec::new();
        write_cross_sell(&mut buffer, &CrossSellSummary::default(), ReportFormat::Json)
            .expect("report written");
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).expect("valid JSON");

        assert!(parsed["ratio_multi_producto"].is_null());
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(Some(50.0)), "50.00%");
        assert_eq!(format_percentage(Some(100.0 / 3.0)), "33.33%");
        assert_eq!(format_percentage(None), "N/A");
    }
}
