//! Price sources and the fund catalog.
//!
//! - `fintual`: HTTP feed client (`reqwest` blocking)
//! - `sample`: offline synthetic price walks
//! - `catalog`: the known funds and their risk labels

use crate::domain::{FetchQuery, FundId, PricePoint};
use crate::error::AppError;

pub mod catalog;
pub mod fintual;
pub mod sample;

pub use catalog::*;
pub use fintual::FintualClient;
pub use sample::SampleSource;

/// Anything that can return the dated price series of a fund.
///
/// Sources are shared across the comparison fan-out, hence `Send + Sync`.
pub trait PriceSource: Send + Sync {
    fn fetch(&self, fund_id: FundId, query: &FetchQuery) -> Result<Vec<PricePoint>, AppError>;
}

impl<S: PriceSource + ?Sized> PriceSource for Box<S> {
    fn fetch(&self, fund_id: FundId, query: &FetchQuery) -> Result<Vec<PricePoint>, AppError> {
        (**self).fetch(fund_id, query)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// In-memory source with canned series and optional failing ids.
    #[derive(Default)]
    pub struct MemorySource {
        pub series: HashMap<FundId, Vec<PricePoint>>,
        pub failing: HashSet<FundId>,
        pub calls: AtomicUsize,
    }

    impl MemorySource {
        pub fn with(mut self, id: FundId, points: Vec<PricePoint>) -> Self {
            self.series.insert(id, points);
            self
        }

        pub fn failing(mut self, id: FundId) -> Self {
            self.failing.insert(id);
            self
        }
    }

    impl PriceSource for MemorySource {
        fn fetch(&self, fund_id: FundId, _query: &FetchQuery) -> Result<Vec<PricePoint>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&fund_id) {
                return Err(AppError::feed(format!("request for fund {fund_id} failed")));
            }
            Ok(self.series.get(&fund_id).cloned().unwrap_or_default())
        }
    }
}
