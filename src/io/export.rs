//! Export monthly variations to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::compare::ComparisonChart;
use crate::domain::MonthlyVariation;
use crate::error::AppError;

#[derive(Serialize)]
struct VariationRow<'a> {
    month: String,
    fund: &'a str,
    variation_percent: String,
}

/// Write one row per month: `month,fund,variation_percent`.
pub fn write_variations_csv(path: &Path, rows: &[MonthlyVariation]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for r in rows {
        writer
            .serialize(VariationRow {
                month: r.month.to_string(),
                fund: &r.fund_label,
                variation_percent: format!("{:.2}", r.variation_percent),
            })
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))?;
    info!(path = %path.display(), rows = rows.len(), "wrote variations CSV");
    Ok(())
}

/// Write the comparison grid: `month,<fund...>`, empty cells where a fund has no value.
pub fn write_comparison_csv(path: &Path, chart: &ComparisonChart) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = vec!["month".to_string()];
    header.extend(chart.series.iter().map(|s| s.label.clone()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for (i, month) in chart.months.iter().enumerate() {
        let mut record = vec![month.to_string()];
        record.extend(
            chart
                .series
                .iter()
                .map(|s| s.values[i].map(|v| format!("{v:.2}")).unwrap_or_default()),
        );
        writer
            .write_record(&record)
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))?;
    info!(path = %path.display(), months = chart.months.len(), "wrote comparison CSV");
    Ok(())
}
