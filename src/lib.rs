//! `fund-variations` library crate.
//!
//! The binary (`fv`) is a thin wrapper around this library so that:
//!
//! - the calculator and comparison logic are testable without spawning processes
//! - the CLI and the TUI share one pipeline
//! - price sources can be swapped (HTTP feed, offline sample, test doubles)

pub mod app;
pub mod cli;
pub mod compare;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod table;
pub mod tui;
pub mod variation;
