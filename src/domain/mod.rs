//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw inputs (`PricePoint`, `DateRange`, `FetchQuery`)
//! - derived outputs (`MonthlyVariation`, `FundSummaryStatistics`)
//! - the fund catalog vocabulary (`Fund`, `RiskType`) and presentation enums

pub mod types;

pub use types::*;
