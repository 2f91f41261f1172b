//! Synthetic fund prices for offline use.
//!
//! Each fund gets a deterministic daily log-normal walk that starts at a
//! fixed origin date. A given `(fund, seed, date)` always maps to the same
//! price, whatever window is requested.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::debug;

use crate::data::{fund_or_unlisted, PriceSource};
use crate::domain::{FetchQuery, FundId, PricePoint, RiskType};
use crate::error::AppError;

/// Length of the default window when no `from` bound is given.
const DEFAULT_WINDOW_DAYS: i64 = 365;

pub struct SampleSource {
    seed: u64,
    origin: NaiveDate,
    today: NaiveDate,
}

impl SampleSource {
    pub fn new(seed: u64) -> Self {
        Self::with_today(seed, Local::now().date_naive())
    }

    /// Pin "today" (the default `to` bound); mostly for tests.
    pub fn with_today(seed: u64, today: NaiveDate) -> Self {
        Self {
            seed,
            origin: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or(NaiveDate::MIN),
            today,
        }
    }

    fn daily_params(fund_id: FundId) -> (f64, f64) {
        // (drift, vol) of daily log returns.
        match fund_or_unlisted(fund_id).risk {
            Some(RiskType::Aggressive) => (0.0004, 0.009),
            Some(RiskType::Moderate) => (0.0003, 0.006),
            Some(RiskType::Conservative) => (0.0002, 0.003),
            Some(RiskType::VeryConservative) => (0.00015, 0.0015),
            None => (0.0002, 0.005),
        }
    }

    fn start_price(fund_id: FundId) -> f64 {
        1000.0 + (fund_id % 100) as f64 * 10.0
    }

    fn walk_seed(&self, fund_id: FundId) -> u64 {
        let mut hasher = DefaultHasher::new();
        fund_id.hash(&mut hasher);
        self.seed.hash(&mut hasher);
        self.origin.hash(&mut hasher);
        hasher.finish()
    }
}

impl PriceSource for SampleSource {
    fn fetch(&self, fund_id: FundId, query: &FetchQuery) -> Result<Vec<PricePoint>, AppError> {
        let end = query.to.unwrap_or(self.today);
        let start = query
            .from
            .unwrap_or_else(|| end - Duration::days(DEFAULT_WINDOW_DAYS))
            .max(self.origin);
        if start > end || end < self.origin {
            return Ok(Vec::new());
        }

        let (drift, vol) = Self::daily_params(fund_id);
        let normal = Normal::new(drift, vol)
            .map_err(|e| AppError::usage(format!("Sample distribution error: {e}")))?;
        let mut rng = StdRng::seed_from_u64(self.walk_seed(fund_id));

        let mut price = Self::start_price(fund_id);
        let mut out = Vec::new();
        let mut day = self.origin;
        while day <= end {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                price *= normal.sample(&mut rng).exp();
                if day >= start {
                    out.push(PricePoint::new(day, price));
                }
            }
            day += Duration::days(1);
        }

        debug!(fund_id, points = out.len(), %start, %end, "generated sample prices");
        Ok(out)
    }
}
