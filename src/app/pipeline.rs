//! Shared workflow used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core flow:
//! fetch -> monthly variations -> statistics (single fund), or
//! fan-out fetch -> join -> comparison chart (several funds).
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::compare::{build_comparison_chart, fetch_comparison, ComparisonChart, ComparisonSet};
use crate::data::{FintualClient, PriceSource, SampleSource};
use crate::domain::{FetchQuery, Fund, FundSummaryStatistics, MonthlyVariation};
use crate::error::{AppError, EXIT_NO_DATA};
use crate::variation::{compute_monthly_variations, compute_summary_statistics};

/// All computed outputs of a single-fund run.
#[derive(Debug, Clone)]
pub struct FundRun {
    pub fund: Fund,
    pub query: FetchQuery,
    pub points_fetched: usize,
    pub variations: Vec<MonthlyVariation>,
    pub statistics: Option<FundSummaryStatistics>,
}

/// All computed outputs of a comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub query: FetchQuery,
    pub set: ComparisonSet,
    pub chart: ComparisonChart,
}

/// Pick the price source: the HTTP feed, or the offline sample.
pub fn make_source(sample: bool, seed: u64) -> Box<dyn PriceSource> {
    if sample {
        Box::new(SampleSource::new(seed))
    } else {
        Box::new(FintualClient::from_env())
    }
}

/// Fetch one fund and compute its months and statistics.
pub fn run_fund(source: &dyn PriceSource, fund: &Fund, query: &FetchQuery) -> Result<FundRun, AppError> {
    let points = source.fetch(fund.id, query)?;
    let variations = compute_monthly_variations(&points, query.range().as_ref(), &fund.name)?;
    if variations.is_empty() {
        return Err(AppError::new(EXIT_NO_DATA, "Monthly variations could not be computed."));
    }

    let statistics = compute_summary_statistics(&variations);
    info!(fund_id = fund.id, months = variations.len(), "computed monthly variations");

    Ok(FundRun {
        fund: fund.clone(),
        query: *query,
        points_fetched: points.len(),
        variations,
        statistics,
    })
}

/// Fetch several funds concurrently and align them on a shared month axis.
pub fn run_comparison(
    source: &dyn PriceSource,
    funds: &[Fund],
    query: &FetchQuery,
) -> Result<ComparisonRun, AppError> {
    let mut set = ComparisonSet::new();
    fetch_comparison(source, funds, query, &mut set)?;

    let chart = build_comparison_chart(&set);
    if chart.months.is_empty() {
        return Err(AppError::new(EXIT_NO_DATA, "No data for the selected funds and date range."));
    }

    Ok(ComparisonRun {
        query: *query,
        set,
        chart,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::testing::MemorySource;
    use crate::data::fund_or_unlisted;
    use crate::domain::PricePoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn run_fund_computes_months_and_statistics() {
        let source = MemorySource::default().with(
            186,
            vec![
                PricePoint::new(d(2024, 1, 5), 100.0),
                PricePoint::new(d(2024, 1, 20), 110.0),
                PricePoint::new(d(2024, 2, 10), 110.0),
                PricePoint::new(d(2024, 2, 25), 99.0),
            ],
        );
        let run = run_fund(&source, &fund_or_unlisted(186), &FetchQuery::default()).unwrap();
        assert_eq!(run.points_fetched, 4);
        assert_eq!(run.variations.len(), 2);
        let stats = run.statistics.unwrap();
        assert_eq!(stats.volatility_percent, 10.0);
    }

    #[test]
    fn run_fund_reports_empty_feed_and_range() {
        let source = MemorySource::default().with(186, vec![PricePoint::new(d(2024, 1, 5), 100.0)]);

        let err = run_fund(&source, &fund_or_unlisted(187), &FetchQuery::default()).unwrap_err();
        assert_eq!(err.to_string(), "No data available for this fund.");

        let query = FetchQuery { from: Some(d(2023, 1, 1)), to: Some(d(2023, 2, 1)) };
        let err = run_fund(&source, &fund_or_unlisted(186), &query).unwrap_err();
        assert_eq!(err.to_string(), "No data for the selected date range.");
    }

    #[test]
    fn run_fund_with_only_missing_prices_fails() {
        let source = MemorySource::default().with(186, vec![PricePoint { date: d(2024, 1, 5), price: None }]);
        let err = run_fund(&source, &fund_or_unlisted(186), &FetchQuery::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }

    #[test]
    fn run_comparison_with_sample_source() {
        let source = SampleSource::with_today(3, d(2024, 12, 31));
        let query = FetchQuery { from: Some(d(2024, 1, 1)), to: Some(d(2024, 6, 30)) };
        let funds = vec![fund_or_unlisted(186), fund_or_unlisted(15077)];
        let run = run_comparison(&source, &funds, &query).unwrap();
        assert_eq!(run.chart.months.len(), 6);
        assert_eq!(run.chart.series.len(), 2);
        assert!(run.chart.series.iter().all(|s| s.values.iter().all(Option::is_some)));
    }

    #[test]
    fn run_comparison_without_any_month_fails() {
        let source = MemorySource::default();
        let err = run_comparison(&source, &[fund_or_unlisted(186)], &FetchQuery::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }
}
