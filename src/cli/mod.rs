//! Command-line parsing for the fund variation tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the calculation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{ChartKind, FundId, RiskType, SortColumn};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fv", version, about = "Monthly variations of investment funds")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `FV_LOG` / `RUST_LOG` take precedence.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one fund's monthly variations, statistics and plot.
    Show(ShowArgs),
    /// Compare up to 4 funds month by month.
    Compare(CompareArgs),
    /// List the known funds.
    Funds(FundsArgs),
    /// Plot a previously exported report JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `fv show` / `fv compare`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Date bounds forwarded to the data source.
///
/// Local month filtering only happens when both bounds are given.
#[derive(Debug, Args, Clone, Default)]
pub struct RangeArgs {
    /// First day to include (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,
}

/// Where prices come from.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// Use offline synthetic prices instead of the live feed.
    #[arg(long)]
    pub sample: bool,

    /// Seed for `--sample` prices.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Terminal plot options.
#[derive(Debug, Args, Clone)]
pub struct PlotOptions {
    /// Chart style.
    #[arg(long, value_enum, default_value_t = ChartKind::Line)]
    pub chart: ChartKind,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Fund id (e.g. 186). Prompts for one when omitted.
    #[arg(short = 'f', long)]
    pub fund: Option<FundId>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Only list months containing this text (e.g. `2024-0`).
    #[arg(long)]
    pub search: Option<String>,

    /// Sort the month table.
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,

    /// Sort descending (with `--sort`).
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[command(flatten)]
    pub plot: PlotOptions,

    /// Export monthly variations to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run (variations + statistics) to JSON.
    #[arg(long = "export-report")]
    pub export_report: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Fund ids to compare (repeat the flag, at most 4).
    #[arg(short = 'f', long = "fund", required = true)]
    pub funds: Vec<FundId>,

    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub plot: PlotOptions,

    /// Export the month x fund grid to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FundsArgs {
    /// Only list funds of this risk type.
    #[arg(long, value_enum)]
    pub risk: Option<RiskType>,
}

/// Options for plotting a saved report.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Report JSON produced by `fv show --export-report`.
    #[arg(long, value_name = "JSON")]
    pub report: PathBuf,

    /// Chart style.
    #[arg(long, value_enum, default_value_t = ChartKind::Line)]
    pub chart: ChartKind,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_range_and_sort() {
        let cli = Cli::parse_from([
            "fv", "show", "-f", "186", "--from", "2024-01-01", "--to", "2024-06-30", "--sort", "variation",
            "--desc", "--chart", "bar",
        ]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.fund, Some(186));
        assert_eq!(args.range.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.sort, Some(SortColumn::Variation));
        assert!(args.desc);
        assert_eq!(args.plot.chart, ChartKind::Bar);
        assert!(!args.source.sample);
    }

    #[test]
    fn parses_repeated_compare_funds() {
        let cli = Cli::parse_from(["fv", "-v", "compare", "-f", "186", "-f", "188", "--sample"]);
        assert_eq!(cli.verbose, 1);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.funds, vec![186, 188]);
        assert!(args.source.sample);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from(["fv", "show", "--from", "2024-13-01"]).is_err());
    }
}
