//! Summary statistics over a fund's monthly variations.

use crate::domain::{FundSummaryStatistics, MonthExtreme, MonthlyVariation};

use super::round2;

/// Summarize monthly variations; `None` when there are none.
///
/// Ties for best/worst month go to the earliest month reaching the extremum
/// (input is expected in ascending month order, as produced by the calculator).
pub fn compute_summary_statistics(variations: &[MonthlyVariation]) -> Option<FundSummaryStatistics> {
    let first = variations.first()?;

    let n = variations.len() as f64;
    let mean = variations.iter().map(|v| v.variation_percent).sum::<f64>() / n;

    // Population variance: divide by N.
    let variance = variations
        .iter()
        .map(|v| (v.variation_percent - mean).powi(2))
        .sum::<f64>()
        / n;

    let mut best = first;
    let mut worst = first;
    for v in &variations[1..] {
        if v.variation_percent > best.variation_percent {
            best = v;
        }
        if v.variation_percent < worst.variation_percent {
            worst = v;
        }
    }

    Some(FundSummaryStatistics {
        average_percent: round2(mean),
        best_month: extreme(best),
        worst_month: extreme(worst),
        volatility_percent: round2(variance.sqrt()),
        positive_month_count: variations.iter().filter(|v| v.variation_percent > 0.0).count(),
        negative_month_count: variations.iter().filter(|v| v.variation_percent < 0.0).count(),
    })
}

fn extreme(v: &MonthlyVariation) -> MonthExtreme {
    MonthExtreme {
        month: v.month,
        variation_percent: v.variation_percent,
    }
}
