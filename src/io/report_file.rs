//! Read/write run report JSON files.
//!
//! A report is the "portable" representation of a single-fund run:
//! - the fund and the requested date bounds
//! - the computed monthly variations
//! - the summary statistics
//!
//! `fv plot --report` re-renders a saved report without touching the feed.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::pipeline::FundRun;
use crate::domain::{Fund, FundSummaryStatistics, MonthlyVariation};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub fund: Fund,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub points_fetched: usize,
    pub variations: Vec<MonthlyVariation>,
    pub statistics: Option<FundSummaryStatistics>,
}

impl ReportFile {
    pub fn from_run(run: &FundRun) -> Self {
        Self {
            tool: "fv".to_string(),
            fund: run.fund.clone(),
            from: run.query.from,
            to: run.query.to,
            points_fetched: run.points_fetched,
            variations: run.variations.clone(),
            statistics: run.statistics.clone(),
        }
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, run: &FundRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &ReportFile::from_run(run))
        .map_err(|e| AppError::usage(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::usage(format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
