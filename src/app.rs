//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the fund(s) and date range
//! - runs the variation pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{CompareArgs, Command, FundsArgs, PlotArgs, RangeArgs, ShowArgs, TuiArgs};
use crate::compare::MAX_COMPARED_FUNDS;
use crate::data::{catalog, fund_or_unlisted, funds_by_risk};
use crate::domain::{FetchQuery, Fund, FundId, RunConfig, SortDirection};
use crate::error::AppError;
use crate::table::TableView;

pub mod pipeline;

/// Entry point for the `fv` binary.
pub fn run() -> Result<(), AppError> {
    // `fv` and `fv --sample` behave like `fv tui ...`; clap needs the subcommand
    // name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    if !matches!(cli.command, Command::Tui(_)) {
        crate::logging::init(cli.verbose);
    }

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Compare(args) => handle_compare(args),
        Command::Funds(args) => handle_funds(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let fund_id = match args.fund {
        Some(id) => id,
        None => crate::cli::picker::prompt_for_fund(&catalog())?,
    };
    let config = run_config_from_show(&args, fund_id)?;
    let fund = fund_or_unlisted(fund_id);
    debug!(?config, "resolved show config");

    let source = pipeline::make_source(config.sample, config.sample_seed);
    let run = pipeline::run_fund(source.as_ref(), &fund, &config.query)?;

    let view = TableView {
        search: config.search.clone().unwrap_or_default(),
        sort: config.sort,
    };
    let rows = view.apply(&run.variations);
    println!("{}", crate::report::format_fund_report(&run, &rows));

    if config.plot {
        let plot =
            crate::plot::render_variation_plot(&run.variations, config.chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_variations_csv(path, &rows)?;
    }
    if let Some(path) = &config.export_report {
        crate::io::write_report_json(path, &run)?;
    }

    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = run_config_from_compare(&args)?;
    let funds: Vec<Fund> = config.funds.iter().copied().map(fund_or_unlisted).collect();
    debug!(?config, "resolved compare config");

    let source = pipeline::make_source(config.sample, config.sample_seed);
    let run = pipeline::run_comparison(source.as_ref(), &funds, &config.query)?;

    println!("{}", crate::report::format_comparison(&run));

    if config.plot {
        let plot =
            crate::plot::render_comparison_plot(&run.chart, config.chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_comparison_csv(path, &run.chart)?;
    }

    Ok(())
}

fn handle_funds(args: FundsArgs) -> Result<(), AppError> {
    let funds = funds_by_risk(args.risk);
    print!("{}", crate::report::format_fund_list(&funds));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let report = crate::io::read_report_json(&args.report)?;

    println!(
        "{} (id={}) {} .. {}",
        report.fund.name,
        report.fund.id,
        report.from.map(|d| d.to_string()).unwrap_or_else(|| "start".to_string()),
        report.to.map(|d| d.to_string()).unwrap_or_else(|| "latest".to_string()),
    );
    let plot = crate::plot::render_variation_plot(&report.variations, args.chart, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::logging::init_quiet();
    crate::tui::run(args)
}

/// Validate the date bounds and turn them into a source query.
pub fn query_from_range(range: &RangeArgs) -> Result<FetchQuery, AppError> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::usage(format!(
                "--from ({from}) must not be after --to ({to})."
            )));
        }
    }
    Ok(FetchQuery {
        from: range.from,
        to: range.to,
    })
}

pub fn run_config_from_show(args: &ShowArgs, fund: FundId) -> Result<RunConfig, AppError> {
    let sort = args.sort.map(|column| {
        let direction = if args.desc { SortDirection::Desc } else { SortDirection::Asc };
        (column, direction)
    });
    Ok(RunConfig {
        funds: vec![fund],
        query: query_from_range(&args.range)?,
        search: args.search.clone().filter(|s| !s.trim().is_empty()),
        sort,
        chart: args.plot.chart,
        plot: !args.plot.no_plot,
        plot_width: args.plot.width,
        plot_height: args.plot.height,
        export_csv: args.export.clone(),
        export_report: args.export_report.clone(),
        sample: args.source.sample,
        sample_seed: args.source.seed,
    })
}

pub fn run_config_from_compare(args: &CompareArgs) -> Result<RunConfig, AppError> {
    // Repeated ids collapse onto their first occurrence.
    let mut funds: Vec<FundId> = Vec::with_capacity(args.funds.len());
    for id in &args.funds {
        if !funds.contains(id) {
            funds.push(*id);
        }
    }
    if funds.is_empty() || funds.len() > MAX_COMPARED_FUNDS {
        return Err(AppError::usage(format!(
            "Compare needs between 1 and {MAX_COMPARED_FUNDS} funds (got {})",
            funds.len()
        )));
    }

    Ok(RunConfig {
        funds,
        query: query_from_range(&args.range)?,
        search: None,
        sort: None,
        chart: args.plot.chart,
        plot: !args.plot.no_plot,
        plot_width: args.plot.width,
        plot_height: args.plot.height,
        export_csv: args.export.clone(),
        export_report: None,
        sample: args.source.sample,
        sample_seed: args.source.seed,
    })
}

/// Rewrite argv so `fv` defaults to `fv tui`.
///
/// Rules:
/// - `fv`                      -> `fv tui`
/// - `fv --sample ...`         -> `fv tui --sample ...`
/// - `fv --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "compare" | "funds" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // Verbosity flags belong to every subcommand; look past them.
    if arg1.starts_with('-') {
        let first_other = argv
            .iter()
            .skip(1)
            .position(|a| !is_verbosity_flag(a))
            .map(|i| i + 1);
        match first_other {
            Some(i) if is_subcommand_name(&argv[i]) => {}
            Some(i) => argv.insert(i, "tui".to_string()),
            None => argv.push("tui".to_string()),
        }
        return argv;
    }

    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}

fn is_subcommand_name(arg: &str) -> bool {
    matches!(arg, "show" | "compare" | "funds" | "plot" | "tui" | "help")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::cli::Cli;
    use crate::domain::{ChartKind, SortColumn};

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["fv"])), argv(&["fv", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["fv", "--sample", "--seed", "7"])),
            argv(&["fv", "tui", "--sample", "--seed", "7"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["fv", "show", "-f", "186"])), argv(&["fv", "show", "-f", "186"]));
        assert_eq!(rewrite_args(argv(&["fv", "--help"])), argv(&["fv", "--help"]));
        assert_eq!(rewrite_args(argv(&["fv", "-vv", "funds"])), argv(&["fv", "-vv", "funds"]));
        assert_eq!(rewrite_args(argv(&["fv", "-v"])), argv(&["fv", "-v", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["fv", "-v", "--sample"])),
            argv(&["fv", "-v", "tui", "--sample"])
        );
    }

    #[test]
    fn reversed_range_is_a_usage_error() {
        let range = RangeArgs {
            from: NaiveDate::from_ymd_opt(2024, 6, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        let err = query_from_range(&range).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn single_bound_is_forwarded() {
        let range = RangeArgs {
            from: NaiveDate::from_ymd_opt(2024, 6, 1),
            to: None,
        };
        let query = query_from_range(&range).unwrap();
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(query.range().is_none());
    }

    #[test]
    fn show_config_carries_table_and_plot_options() {
        let cli = Cli::parse_from(["fv", "show", "--sort", "variation", "--desc", "--search", " ", "--no-plot"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        let config = run_config_from_show(&args, 187).unwrap();
        assert_eq!(config.funds, vec![187]);
        assert_eq!(config.sort, Some((SortColumn::Variation, SortDirection::Desc)));
        assert_eq!(config.search, None);
        assert!(!config.plot);
        assert_eq!(config.chart, ChartKind::Line);
    }

    #[test]
    fn show_config_without_sort_keeps_month_order() {
        let cli = Cli::parse_from(["fv", "show", "-f", "186"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(run_config_from_show(&args, 186).unwrap().sort, None);

        let cli = Cli::parse_from(["fv", "show", "--sort", "month"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(
            run_config_from_show(&args, 186).unwrap().sort,
            Some((SortColumn::Month, SortDirection::Asc))
        );
    }

    #[test]
    fn compare_config_dedupes_and_caps() {
        let cli = Cli::parse_from(["fv", "compare", "-f", "186", "-f", "186", "-f", "188"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(run_config_from_compare(&args).unwrap().funds, vec![186, 188]);

        let cli = Cli::parse_from(["fv", "compare", "-f", "1", "-f", "2", "-f", "3", "-f", "4", "-f", "5"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        let err = run_config_from_compare(&args).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}
