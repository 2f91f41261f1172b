//! Input/output helpers.
//!
//! - CSV exports of variations and comparisons (`export`)
//! - run report JSON read/write (`report_file`)

pub mod export;
pub mod report_file;

pub use export::*;
pub use report_file::*;
