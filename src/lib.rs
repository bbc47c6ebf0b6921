//! Core library for the cartera-stats command line application.
//!
//! The library reads a policy listing workbook and derives aggregate
//! statistics from it. Spreadsheet adapters live under
//! [`cartera::stats::io`], row representations inside [`cartera::stats::model`],
//! the aggregations in [`cartera::stats::tally`], output formatting in
//! [`cartera::stats::report`], and the end-to-end pipeline under
//! [`cartera::stats::analysis`].

pub mod cartera;

pub use cartera::stats::{Result, ToolError, analysis, error, io, model, report, tally};
