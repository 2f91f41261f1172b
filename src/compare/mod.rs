//! Multi-fund comparison.
//!
//! Fetches run concurrently (one per fund) and are joined before anything is
//! aggregated. The joined results land in a caller-owned [`ComparisonSet`],
//! which [`build_comparison_chart`] turns into a shared month axis with
//! explicit gaps.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::data::PriceSource;
use crate::domain::{FetchQuery, Fund, FundSummaryStatistics, MonthKey, MonthlyVariation};
use crate::error::AppError;
use crate::variation::{compute_monthly_variations, compute_summary_statistics, VariationError};

/// Upper bound on funds compared at once (enforced by the front-ends).
pub const MAX_COMPARED_FUNDS: usize = 4;

/// One fund's computed months inside a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedFund {
    pub fund: Fund,
    pub variations: Vec<MonthlyVariation>,
}

impl ComparedFund {
    pub fn statistics(&self) -> Option<FundSummaryStatistics> {
        compute_summary_statistics(&self.variations)
    }
}

/// Accumulator of per-fund results, in insertion (selection) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    entries: Vec<ComparedFund>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a fund's months.
    pub fn insert(&mut self, fund: Fund, variations: Vec<MonthlyVariation>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.fund.id == fund.id) {
            existing.variations = variations;
            return;
        }
        self.entries.push(ComparedFund { fund, variations });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ComparedFund] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fund's values aligned to [`ComparisonChart::months`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    pub label: String,
    /// `None` where the fund has no value for that month.
    pub values: Vec<Option<f64>>,
}

/// Category axis plus one aligned series per fund.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub months: Vec<MonthKey>,
    pub series: Vec<ComparisonSeries>,
}

/// Fetch and compute every fund concurrently, then fold the results into `acc`.
///
/// All fetches are joined before `acc` is touched. Any failure aborts the
/// whole comparison and leaves `acc` unchanged.
pub fn fetch_comparison(
    source: &dyn PriceSource,
    funds: &[Fund],
    query: &FetchQuery,
    acc: &mut ComparisonSet,
) -> Result<(), AppError> {
    let range = query.range();

    let results: Vec<(Fund, Vec<MonthlyVariation>)> = funds
        .par_iter()
        .map(|fund| {
            let points = source.fetch(fund.id, query)?;
            let variations = match compute_monthly_variations(&points, range.as_ref(), &fund.name) {
                Ok(v) => v,
                Err(err @ (VariationError::EmptyInput | VariationError::EmptyRange)) => {
                    warn!(fund_id = fund.id, %err, "fund has no months to compare");
                    Vec::new()
                }
                Err(err) => return Err(AppError::from(err)),
            };
            Ok((fund.clone(), variations))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    for (fund, variations) in results {
        acc.insert(fund, variations);
    }
    info!(funds = acc.len(), "comparison fetch complete");
    Ok(())
}

/// Build the union month axis and per-fund aligned series.
pub fn build_comparison_chart(set: &ComparisonSet) -> ComparisonChart {
    let months: Vec<MonthKey> = set
        .entries()
        .iter()
        .flat_map(|e| e.variations.iter().map(|v| v.month))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = set
        .entries()
        .iter()
        .map(|e| ComparisonSeries {
            label: e.fund.name.clone(),
            values: months
                .iter()
                .map(|m| {
                    e.variations
                        .iter()
                        .find(|v| v.month == *m)
                        .map(|v| v.variation_percent)
                })
                .collect(),
        })
        .collect();

    ComparisonChart { months, series }
}
