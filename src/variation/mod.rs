//! Monthly variation calculator.
//!
//! Turns an irregular `(date, price)` series into one percentage variation per
//! calendar month, then summarizes those months.
//!
//! The work is split into named stages so each one can be tested on its own:
//!
//! `filter_by_range -> group_by_month -> month_variation -> sorted output`
//!
//! Everything here is pure: no I/O, no shared state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{DateRange, MonthKey, MonthlyVariation, PricePoint};

pub mod error;
pub mod stats;

pub use error::VariationError;
pub use stats::compute_summary_statistics;

/// Compute one variation record per calendar month present in `points`.
///
/// Output is strictly ascending by month. See [`VariationError`] for the
/// conditions signalled to the caller.
pub fn compute_monthly_variations(
    points: &[PricePoint],
    range: Option<&DateRange>,
    fund_label: &str,
) -> Result<Vec<MonthlyVariation>, VariationError> {
    if points.is_empty() {
        return Err(VariationError::EmptyInput);
    }

    let filtered = filter_by_range(points, range);
    if filtered.is_empty() {
        return Err(VariationError::EmptyRange);
    }

    let groups = group_by_month(&filtered);
    debug!(
        label = fund_label,
        points = points.len(),
        in_range = filtered.len(),
        months = groups.len(),
        "grouped price points by month"
    );

    // BTreeMap iteration is already ascending by month.
    let mut out = Vec::with_capacity(groups.len());
    for (month, group) in groups {
        let variation_percent = month_variation(month, &group)?;
        out.push(MonthlyVariation {
            month,
            variation_percent,
            fund_label: fund_label.to_string(),
        });
    }

    Ok(out)
}

/// Keep the points whose date falls inside `range` (all of them when `None`).
pub fn filter_by_range(points: &[PricePoint], range: Option<&DateRange>) -> Vec<PricePoint> {
    match range {
        Some(range) => points.iter().filter(|p| range.contains(p.date)).copied().collect(),
        None => points.to_vec(),
    }
}

/// Group points by calendar month, dropping points without a usable price.
///
/// Each group comes back sorted ascending by date.
pub fn group_by_month(points: &[PricePoint]) -> BTreeMap<MonthKey, Vec<(chrono::NaiveDate, f64)>> {
    let mut groups: BTreeMap<MonthKey, Vec<(chrono::NaiveDate, f64)>> = BTreeMap::new();
    let mut skipped = 0usize;

    for p in points {
        let Some(price) = p.price.filter(|v| v.is_finite()) else {
            skipped += 1;
            continue;
        };
        groups
            .entry(MonthKey::from_date(p.date))
            .or_default()
            .push((p.date, price));
    }

    if skipped > 0 {
        debug!(skipped, "dropped points with missing or non-numeric price");
    }

    for group in groups.values_mut() {
        group.sort_by_key(|(date, _)| *date);
    }
    groups
}

/// Percentage change between the first and last price of a date-sorted group.
pub fn month_variation(month: MonthKey, group: &[(chrono::NaiveDate, f64)]) -> Result<f64, VariationError> {
    let (Some(&(_, first)), Some(&(_, last))) = (group.first(), group.last()) else {
        return Ok(0.0);
    };

    if first == 0.0 {
        return Err(VariationError::DegenerateGroup { month });
    }

    // Rounding scales by 100, so huge finite changes can still overflow there.
    let rounded = round2((last - first) / first * 100.0);
    if !rounded.is_finite() {
        return Err(VariationError::DegenerateGroup { month });
    }
    Ok(rounded)
}

/// Round to 2 decimals, half away from zero.
pub fn round2(x: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0.
    (x * 100.0).round() / 100.0 + 0.0
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn worked_example() -> Vec<PricePoint> {
        vec![
            PricePoint::new(d(2024, 1, 5), 100.0),
            PricePoint::new(d(2024, 1, 20), 110.0),
            PricePoint::new(d(2024, 2, 10), 110.0),
            PricePoint::new(d(2024, 2, 25), 99.0),
        ]
    }

    #[test]
    fn worked_example_matches() {
        let out = compute_monthly_variations(&worked_example(), None, "Risky Norris").unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].month, MonthKey::new(2024, 1));
        assert_eq!(out[0].variation_percent, 10.0);
        assert_eq!(out[1].month, MonthKey::new(2024, 2));
        assert_eq!(out[1].variation_percent, -10.0);
        assert!(out.iter().all(|v| v.fund_label == "Risky Norris"));
    }

    #[test]
    fn empty_input_is_reported() {
        let err = compute_monthly_variations(&[], None, "x").unwrap_err();
        assert_eq!(err, VariationError::EmptyInput);
    }

    #[test]
    fn range_excluding_everything_is_reported() {
        let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31));
        let err = compute_monthly_variations(&worked_example(), Some(&range), "x").unwrap_err();
        assert_eq!(err, VariationError::EmptyRange);
    }

    #[test]
    fn zero_first_price_is_degenerate() {
        let points = vec![
            PricePoint::new(d(2024, 3, 1), 0.0),
            PricePoint::new(d(2024, 3, 15), 10.0),
        ];
        let err = compute_monthly_variations(&points, None, "x").unwrap_err();
        assert_eq!(err, VariationError::DegenerateGroup { month: MonthKey::new(2024, 3) });
    }

    #[test]
    fn overflowing_variation_is_degenerate() {
        let points = vec![
            PricePoint::new(d(2024, 1, 1), 1.0),
            PricePoint::new(d(2024, 1, 31), 1e306),
        ];
        let err = compute_monthly_variations(&points, None, "x").unwrap_err();
        assert_eq!(err, VariationError::DegenerateGroup { month: MonthKey::new(2024, 1) });
    }

    #[test]
    fn unsorted_input_uses_earliest_and_latest_dates() {
        let points = vec![
            PricePoint::new(d(2024, 5, 31), 120.0),
            PricePoint::new(d(2024, 5, 1), 100.0),
            PricePoint::new(d(2024, 5, 15), 90.0),
        ];
        let out = compute_monthly_variations(&points, None, "x").unwrap();
        assert_eq!(out[0].variation_percent, 20.0);
    }

    #[test]
    fn single_point_month_has_zero_variation() {
        let points = vec![PricePoint::new(d(2024, 6, 10), 42.0)];
        let out = compute_monthly_variations(&points, None, "x").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].variation_percent, 0.0);
    }

    #[test]
    fn range_bounds_are_inclusive_calendar_dates() {
        let range = DateRange::new(d(2024, 1, 20), d(2024, 2, 10));
        let out = compute_monthly_variations(&worked_example(), Some(&range), "x").unwrap();
        // Only one point survives per month.
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.variation_percent == 0.0));
    }

    #[test]
    fn missing_prices_join_no_group() {
        let points = vec![
            PricePoint { date: d(2024, 1, 1), price: None },
            PricePoint::new(d(2024, 1, 2), 100.0),
            PricePoint::new(d(2024, 1, 30), 101.0),
            PricePoint { date: d(2024, 2, 3), price: Some(f64::NAN) },
        ];
        let out = compute_monthly_variations(&points, None, "x").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].month, MonthKey::new(2024, 1));
        assert_eq!(out[0].variation_percent, 1.0);
    }

    #[test]
    fn only_invalid_prices_yield_no_records() {
        let points = vec![PricePoint { date: d(2024, 1, 1), price: None }];
        let out = compute_monthly_variations(&points, None, "x").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.345_000_1), -2.35);
        assert_eq!(round2(3.0), 3.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    fn arb_points() -> impl Strategy<Value = Vec<PricePoint>> {
        prop::collection::vec((0i64..730, 1.0f64..1000.0), 1..80).prop_map(|raw| {
            let base = d(2023, 1, 1);
            raw.into_iter()
                .map(|(offset, price)| PricePoint::new(base + chrono::Duration::days(offset), price))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn month_keys_match_distinct_input_months(points in arb_points()) {
            let out = compute_monthly_variations(&points, None, "p").unwrap();
            let expected: BTreeSet<MonthKey> = points.iter().map(|p| MonthKey::from_date(p.date)).collect();
            let got: BTreeSet<MonthKey> = out.iter().map(|v| v.month).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn output_is_strictly_ascending(points in arb_points()) {
            let out = compute_monthly_variations(&points, None, "p").unwrap();
            prop_assert!(out.windows(2).all(|w| w[0].month < w[1].month));
        }

        #[test]
        fn calculator_is_idempotent(points in arb_points()) {
            let a = compute_monthly_variations(&points, None, "p").unwrap();
            let b = compute_monthly_variations(&points, None, "p").unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn range_filter_keeps_only_months_inside(points in arb_points(), lo in 0i64..365, span in 0i64..365) {
            let base = d(2023, 1, 1);
            let range = DateRange::new(base + chrono::Duration::days(lo), base + chrono::Duration::days(lo + span));
            match compute_monthly_variations(&points, Some(&range), "p") {
                Ok(out) => {
                    let expected: BTreeSet<MonthKey> = points
                        .iter()
                        .filter(|p| range.contains(p.date))
                        .map(|p| MonthKey::from_date(p.date))
                        .collect();
                    let got: BTreeSet<MonthKey> = out.iter().map(|v| v.month).collect();
                    prop_assert_eq!(got, expected);
                }
                Err(err) => {
                    prop_assert_eq!(err, VariationError::EmptyRange);
                    prop_assert!(points.iter().all(|p| !range.contains(p.date)));
                }
            }
        }
    }
}
