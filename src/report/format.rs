//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculation code stays clean and testable
//! - output changes are localized (the golden tests below pin them)

use crate::app::pipeline::{ComparisonRun, FundRun};
use crate::domain::{FetchQuery, Fund, FundSummaryStatistics, MonthlyVariation};

/// Format the single-fund report: header, month table, statistics.
///
/// `rows` is the table view (searched/sorted); statistics always cover all months.
pub fn format_fund_report(run: &FundRun, rows: &[MonthlyVariation]) -> String {
    let mut out = String::new();

    out.push_str("=== fv - Monthly fund variations ===\n");
    out.push_str(&format!(
        "Fund: {} (id={}, risk={})\n",
        run.fund.name,
        run.fund.id,
        run.fund.risk_label()
    ));
    out.push_str(&format!("Range: {}\n", fmt_query(&run.query)));
    out.push_str(&format!(
        "Points: n={} | months={}\n",
        run.points_fetched,
        run.variations.len()
    ));
    out.push('\n');

    out.push_str(&format_variation_table(rows));
    if rows.len() != run.variations.len() {
        out.push_str(&format!("({} of {} months shown)\n", rows.len(), run.variations.len()));
    }
    out.push('\n');

    if let Some(stats) = &run.statistics {
        out.push_str(&format_statistics(stats));
    }

    out
}

/// Month / variation table.
pub fn format_variation_table(rows: &[MonthlyVariation]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>12}\n", "month", "variation_%"));
    out.push_str(&format!("{:-<8} {:-<12}\n", "", ""));
    for r in rows {
        out.push_str(&format!("{:<8} {:>12}\n", r.month.to_string(), fmt_pct(r.variation_percent)));
    }
    out
}

pub fn format_statistics(stats: &FundSummaryStatistics) -> String {
    let mut out = String::new();
    out.push_str("Statistics:\n");
    out.push_str(&format!("- average     : {}%\n", fmt_pct(stats.average_percent)));
    out.push_str(&format!(
        "- best month  : {} ({}%)\n",
        stats.best_month.month,
        fmt_pct(stats.best_month.variation_percent)
    ));
    out.push_str(&format!(
        "- worst month : {} ({}%)\n",
        stats.worst_month.month,
        fmt_pct(stats.worst_month.variation_percent)
    ));
    out.push_str(&format!("- volatility  : {:.2}%\n", stats.volatility_percent));
    out.push_str(&format!(
        "- months      : {} positive / {} negative\n",
        stats.positive_month_count, stats.negative_month_count
    ));
    out
}

/// Month rows x fund columns, `-` where a fund has no value, plus per-fund summaries.
pub fn format_comparison(run: &ComparisonRun) -> String {
    let mut out = String::new();

    out.push_str("=== fv - Fund comparison ===\n");
    out.push_str(&format!("Range: {}\n\n", fmt_query(&run.query)));

    let mut header = format!("{:<8}", "month");
    let mut rule = format!("{:-<8}", "");
    for s in &run.chart.series {
        header.push_str(&format!(" {:>16}", truncate(&s.label, 16)));
        rule.push_str(&format!(" {:-<16}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (i, month) in run.chart.months.iter().enumerate() {
        let mut line = format!("{:<8}", month.to_string());
        for s in &run.chart.series {
            let cell = s.values[i].map(fmt_pct).unwrap_or_else(|| "-".to_string());
            line.push_str(&format!(" {cell:>16}"));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\nSummary:\n");
    for entry in run.set.entries() {
        match entry.statistics() {
            Some(stats) => out.push_str(&format!(
                "- {:<26} avg={}% vol={:.2}% best={} worst={}\n",
                truncate(&entry.fund.name, 26),
                fmt_pct(stats.average_percent),
                stats.volatility_percent,
                stats.best_month.month,
                stats.worst_month.month,
            )),
            None => out.push_str(&format!("- {:<26} no data\n", truncate(&entry.fund.name, 26))),
        }
    }

    out
}

pub fn format_fund_list(funds: &[Fund]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6}  {:<26} {}\n", "id", "name", "risk"));
    out.push_str(&format!("{:->6}  {:-<26} {:-<16}\n", "", "", ""));
    for f in funds {
        out.push_str(&format!("{:>6}  {:<26} {}\n", f.id, truncate(&f.name, 26), f.risk_label()));
    }
    out
}

pub fn fmt_query(query: &FetchQuery) -> String {
    let from = query.from.map(|d| d.to_string()).unwrap_or_else(|| "start".to_string());
    let to = query.to.map(|d| d.to_string()).unwrap_or_else(|| "latest".to_string());
    format!("{from} .. {to}")
}

/// Two decimals with an explicit sign for gains.
pub fn fmt_pct(v: f64) -> String {
    if v > 0.0 {
        format!("+{v:.2}")
    } else {
        format!("{v:.2}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{build_comparison_chart, ComparisonSet};
    use crate::data::fund_or_unlisted;
    use crate::domain::MonthKey;
    use crate::variation::compute_summary_statistics;

    fn variation(m: u32, v: f64) -> MonthlyVariation {
        MonthlyVariation {
            month: MonthKey::new(2024, m),
            variation_percent: v,
            fund_label: "Risky Norris".to_string(),
        }
    }

    #[test]
    fn fund_report_golden() {
        let variations = vec![variation(1, 10.0), variation(2, -10.0)];
        let run = FundRun {
            fund: fund_or_unlisted(186),
            query: FetchQuery::default(),
            points_fetched: 4,
            statistics: compute_summary_statistics(&variations),
            variations: variations.clone(),
        };

        let txt = format_fund_report(&run, &variations);
        let expected = concat!(
            "=== fv - Monthly fund variations ===\n",
            "Fund: Risky Norris (id=186, risk=Agresivo)\n",
            "Range: start .. latest\n",
            "Points: n=4 | months=2\n",
            "\n",
            "month     variation_%\n",
            "-------- ------------\n",
            "2024-01        +10.00\n",
            "2024-02        -10.00\n",
            "\n",
            "Statistics:\n",
            "- average     : 0.00%\n",
            "- best month  : 2024-01 (+10.00%)\n",
            "- worst month : 2024-02 (-10.00%)\n",
            "- volatility  : 10.00%\n",
            "- months      : 1 positive / 1 negative\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn filtered_table_notes_hidden_rows() {
        let variations = vec![variation(1, 1.0), variation(2, 2.0)];
        let run = FundRun {
            fund: fund_or_unlisted(186),
            query: FetchQuery::default(),
            points_fetched: 4,
            statistics: None,
            variations: variations.clone(),
        };
        let txt = format_fund_report(&run, &variations[..1]);
        assert!(txt.contains("(1 of 2 months shown)"));
    }

    #[test]
    fn comparison_marks_missing_months() {
        let mut set = ComparisonSet::new();
        set.insert(fund_or_unlisted(186), vec![variation(1, 1.0), variation(2, 2.0)]);
        set.insert(fund_or_unlisted(188), vec![variation(2, -0.5)]);
        let run = ComparisonRun {
            query: FetchQuery::default(),
            chart: build_comparison_chart(&set),
            set,
        };

        let txt = format_comparison(&run);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[3], "month        Risky Norris Conservative Cl.");
        assert_eq!(lines[5], "2024-01             +1.00                -");
        assert_eq!(lines[6], "2024-02             +2.00            -0.50");
        assert!(txt.contains("Summary:"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Conservative Clooney", 13), "Conservative.");
        assert_eq!(truncate("short", 14), "short");
    }
}
