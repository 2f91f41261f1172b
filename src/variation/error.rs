//! Conditions the calculator signals to its caller.

use thiserror::Error;

use crate::domain::MonthKey;

/// Expected outcomes of real-world sparse data, none of them fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationError {
    /// No price points were provided at all.
    #[error("no price points provided")]
    EmptyInput,

    /// Price points were provided but none fall inside the requested range.
    #[error("no price points fall inside the requested date range")]
    EmptyRange,

    /// The first price of a month is zero, so the percentage is undefined.
    #[error("first price of {month} is zero; variation is undefined")]
    DegenerateGroup { month: MonthKey },
}
