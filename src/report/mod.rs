//! Reporting utilities: formatted terminal output for runs and comparisons.

pub mod format;

pub use format::*;
