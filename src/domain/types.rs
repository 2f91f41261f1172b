//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by any price source (HTTP feed, synthetic sample)
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric identifier of a fund (a "real asset" on the feed).
pub type FundId = u32;

/// A single dated price sample as received from a price source.
///
/// `price` is `None` when the feed sent a missing or non-numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price: Some(price),
        }
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` when `date` lies in `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Calendar month key.
///
/// Ordering is chronological; the `YYYY-MM` text form sorts the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month key '{s}' (expected YYYY-MM)"))?;
        let year = y
            .parse::<i32>()
            .map_err(|e| format!("invalid year in month key '{s}': {e}"))?;
        let month = m
            .parse::<u32>()
            .map_err(|e| format!("invalid month in month key '{s}': {e}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in month key '{s}'"));
        }
        Ok(Self { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Percentage change between a month's first and last recorded price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVariation {
    pub month: MonthKey,
    /// Rounded to 2 decimals.
    pub variation_percent: f64,
    pub fund_label: String,
}

/// A month singled out by the summary (best or worst).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthExtreme {
    pub month: MonthKey,
    pub variation_percent: f64,
}

/// Aggregate statistics over a non-empty set of monthly variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSummaryStatistics {
    pub average_percent: f64,
    pub best_month: MonthExtreme,
    pub worst_month: MonthExtreme,
    /// Population standard deviation of the monthly values (not annualized).
    pub volatility_percent: f64,
    pub positive_month_count: usize,
    pub negative_month_count: usize,
}

/// Risk profile label attached to each fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RiskType {
    Aggressive,
    Moderate,
    Conservative,
    VeryConservative,
}

impl RiskType {
    pub const ALL: [RiskType; 4] = [
        RiskType::Aggressive,
        RiskType::Moderate,
        RiskType::Conservative,
        RiskType::VeryConservative,
    ];

    /// Label used by the fund feed.
    pub fn display_name(self) -> &'static str {
        match self {
            RiskType::Aggressive => "Agresivo",
            RiskType::Moderate => "Moderado",
            RiskType::Conservative => "Conservador",
            RiskType::VeryConservative => "Muy Conservador",
        }
    }
}

/// Cycle through "all risk types" and each concrete risk type.
pub fn next_risk_filter(cur: Option<RiskType>) -> Option<RiskType> {
    match cur {
        None => Some(RiskType::Aggressive),
        Some(RiskType::Aggressive) => Some(RiskType::Moderate),
        Some(RiskType::Moderate) => Some(RiskType::Conservative),
        Some(RiskType::Conservative) => Some(RiskType::VeryConservative),
        Some(RiskType::VeryConservative) => None,
    }
}

/// An investable fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    pub risk: Option<RiskType>,
}

impl Fund {
    pub fn new(id: FundId, name: impl Into<String>, risk: RiskType) -> Self {
        Self {
            id,
            name: name.into(),
            risk: Some(risk),
        }
    }

    /// A fund that is not in the catalog (the feed accepts any real asset id).
    pub fn unlisted(id: FundId) -> Self {
        Self {
            id,
            name: format!("fund {id}"),
            risk: None,
        }
    }

    pub fn risk_label(&self) -> &'static str {
        self.risk.map(RiskType::display_name).unwrap_or("-")
    }
}

/// How monthly series are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    pub fn toggle(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }
}

/// Table column used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Month,
    Variation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// What to ask a price source for.
///
/// Each bound is forwarded to the source on its own; the calculator only
/// filters locally when both are present (see [`FetchQuery::range`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl FetchQuery {
    pub fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}

/// Fully resolved settings for one CLI run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub funds: Vec<FundId>,
    pub query: FetchQuery,

    pub search: Option<String>,
    pub sort: Option<(SortColumn, SortDirection)>,

    pub chart: ChartKind,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_report: Option<PathBuf>,

    /// Use the offline synthetic source instead of the HTTP feed.
    pub sample: bool,
    pub sample_seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_orders_chronologically_and_pads() {
        let a = MonthKey::new(2023, 12);
        let b = MonthKey::new(2024, 2);
        let c = MonthKey::new(2024, 10);
        assert!(a < b && b < c);
        assert_eq!(b.to_string(), "2024-02");
        assert!(a.to_string() < b.to_string() && b.to_string() < c.to_string());
    }

    #[test]
    fn month_key_parses_and_rejects() {
        assert_eq!("2024-03".parse::<MonthKey>(), Ok(MonthKey::new(2024, 3)));
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("202403".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_serializes_as_string() {
        let json = serde_json::to_string(&MonthKey::new(2024, 1)).unwrap();
        assert_eq!(json, "\"2024-01\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MonthKey::new(2024, 1));
    }

    #[test]
    fn date_range_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DateRange::new(start, end);
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    }

    #[test]
    fn fetch_query_needs_both_bounds_for_range() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let only_from = FetchQuery { from: Some(d), to: None };
        assert_eq!(only_from.range(), None);
        let both = FetchQuery { from: Some(d), to: Some(d) };
        assert_eq!(both.range(), Some(DateRange::new(d, d)));
    }

    #[test]
    fn risk_filter_cycles_back_to_all() {
        let mut cur = None;
        for _ in 0..5 {
            cur = next_risk_filter(cur);
        }
        assert_eq!(cur, None);
    }
}
