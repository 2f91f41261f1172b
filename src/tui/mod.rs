//! Ratatui-based terminal UI.
//!
//! The dashboard lists the known funds (filterable by risk type), shows one
//! fund's monthly variations or a comparison of up to four funds, and lets the
//! user edit the date range, switch between line and bar charts, and search or
//! sort the month table.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotters::style::RGBColor;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
    Terminal,
};
use tracing::{debug, warn};

use crate::app::pipeline::{self, ComparisonRun, FundRun};
use crate::cli::TuiArgs;
use crate::compare::MAX_COMPARED_FUNDS;
use crate::data::{funds_by_risk, PriceSource};
use crate::domain::{
    next_risk_filter, ChartKind, FetchQuery, Fund, MonthKey, RiskType, SortColumn, SortDirection,
};
use crate::error::AppError;
use crate::report::fmt_pct;
use crate::table::TableView;

mod plotters_chart;

use plotters_chart::{ChartSeries, VariationChart};

/// Series colours, in selection order.
const PALETTE: [(u8, u8, u8); 4] = [(102, 126, 234), (234, 102, 126), (126, 234, 102), (234, 179, 102)];

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let query = crate::app::query_from_range(&args.range)?;
    let source = pipeline::make_source(args.source.sample, args.source.seed);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(source, query);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Compare,
}

/// Which text field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditField {
    From,
    To,
    Search,
}

/// What the body currently shows.
#[derive(Debug, Clone)]
enum View {
    Fund(FundRun),
    Comparison(ComparisonRun),
}

struct App {
    source: Box<dyn PriceSource>,
    query: FetchQuery,
    risk_filter: Option<RiskType>,
    funds: Vec<Fund>,
    cursor: usize,
    mode: Mode,
    /// Fund shown in single mode.
    current: Option<Fund>,
    /// Funds selected in compare mode, in selection order.
    selected: Vec<Fund>,
    chart: ChartKind,
    table: TableView,
    editing: Option<EditField>,
    input: String,
    status: String,
    view: Option<View>,
}

impl App {
    fn new(source: Box<dyn PriceSource>, query: FetchQuery) -> Self {
        Self {
            source,
            query,
            risk_filter: None,
            funds: funds_by_risk(None),
            cursor: 0,
            mode: Mode::Single,
            current: None,
            selected: Vec::new(),
            chart: ChartKind::Line,
            table: TableView::default(),
            editing: None,
            input: String::new(),
            status: "Select a fund and press Enter.".to_string(),
            view: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(field) = self.editing {
            self.handle_edit(field, code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.funds.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(fund) = self.funds.get(self.cursor).cloned() {
                    match self.mode {
                        Mode::Single => {
                            self.current = Some(fund);
                            self.reload();
                        }
                        Mode::Compare => self.toggle_compare(fund),
                    }
                }
            }
            KeyCode::Char('c') => self.toggle_mode(),
            KeyCode::Char('r') => {
                self.risk_filter = next_risk_filter(self.risk_filter);
                self.funds = funds_by_risk(self.risk_filter);
                self.cursor = 0;
                self.status = format!("risk: {}", risk_filter_label(self.risk_filter));
                let hidden = self
                    .current
                    .as_ref()
                    .is_some_and(|cur| !self.funds.iter().any(|f| f.id == cur.id));
                if hidden {
                    self.current = None;
                    if self.mode == Mode::Single {
                        self.view = None;
                    }
                }
            }
            KeyCode::Char('f') => self.start_edit(EditField::From),
            KeyCode::Char('t') => self.start_edit(EditField::To),
            KeyCode::Char('/') => self.start_edit(EditField::Search),
            KeyCode::Char('x') => {
                self.table.clear_search();
                self.status = "Search cleared.".to_string();
            }
            KeyCode::Char('g') => {
                self.chart = self.chart.toggle();
                self.status = format!("chart: {}", chart_label(self.chart));
            }
            KeyCode::Char('m') => self.table.toggle_sort(SortColumn::Month),
            KeyCode::Char('v') => self.table.toggle_sort(SortColumn::Variation),
            _ => {}
        }

        false
    }

    fn start_edit(&mut self, field: EditField) {
        self.input = match field {
            EditField::From => self.query.from.map(|d| d.to_string()).unwrap_or_default(),
            EditField::To => self.query.to.map(|d| d.to_string()).unwrap_or_default(),
            EditField::Search => self.table.search.clone(),
        };
        self.editing = Some(field);
        self.status = match field {
            EditField::Search => "Search months. Enter to apply, Esc to cancel.".to_string(),
            _ => "Editing date (YYYY-MM-DD, empty = none). Enter to apply, Esc to cancel.".to_string(),
        };
    }

    fn handle_edit(&mut self, field: EditField, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = None;
                match field {
                    EditField::Search => {
                        self.table.search = self.input.trim().to_string();
                        self.status = format!("search: '{}'", self.table.search);
                    }
                    EditField::From | EditField::To => self.apply_date_input(field),
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                let accepted = match field {
                    EditField::Search => !c.is_control(),
                    _ => c.is_ascii_digit() || c == '-',
                };
                if accepted {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_date_input(&mut self, field: EditField) {
        let trimmed = self.input.trim();
        let date = if trimmed.is_empty() {
            None
        } else {
            match chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(e) => {
                    self.status = format!("Invalid date '{trimmed}': {e}");
                    return;
                }
            }
        };

        let mut next = self.query;
        match field {
            EditField::From => next.from = date,
            _ => next.to = date,
        }
        if let (Some(from), Some(to)) = (next.from, next.to) {
            if from > to {
                self.status = format!("Start date ({from}) must not be after end date ({to}).");
                return;
            }
        }

        self.query = next;
        self.status = format!("range: {}", crate::report::fmt_query(&self.query));
        self.reload();
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Single => Mode::Compare,
            Mode::Compare => Mode::Single,
        };
        self.selected.clear();
        self.view = None;
        self.status = match self.mode {
            Mode::Single => "Single fund mode.".to_string(),
            Mode::Compare => format!("Compare mode: select up to {MAX_COMPARED_FUNDS} funds with Enter."),
        };
        if self.mode == Mode::Single && self.current.is_some() {
            self.reload();
        }
    }

    /// Add or remove a fund from the comparison, keeping selection order.
    fn toggle_compare(&mut self, fund: Fund) {
        if let Some(pos) = self.selected.iter().position(|f| f.id == fund.id) {
            self.selected.remove(pos);
        } else if self.selected.len() >= MAX_COMPARED_FUNDS {
            self.status = format!("At most {MAX_COMPARED_FUNDS} funds can be compared.");
            return;
        } else {
            self.selected.push(fund);
        }
        self.reload();
    }

    /// Recompute the view for the current mode, reporting failures in the status line.
    fn reload(&mut self) {
        let result = match self.mode {
            Mode::Single => {
                let Some(fund) = &self.current else {
                    return;
                };
                pipeline::run_fund(self.source.as_ref(), fund, &self.query).map(|run| {
                    let msg = format!("{}: {} months", run.fund.name, run.variations.len());
                    (View::Fund(run), msg)
                })
            }
            Mode::Compare => {
                if self.selected.is_empty() {
                    self.view = None;
                    self.status = "No funds selected.".to_string();
                    return;
                }
                pipeline::run_comparison(self.source.as_ref(), &self.selected, &self.query).map(|run| {
                    let msg = format!("comparing {} funds over {} months", run.set.len(), run.chart.months.len());
                    (View::Comparison(run), msg)
                })
            }
        };

        match result {
            Ok((view, msg)) => {
                debug!(status = %msg, "view reloaded");
                self.view = Some(view);
                self.status = msg;
            }
            Err(err) => {
                warn!(%err, "view reload failed");
                self.view = None;
                self.status = err.message().to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mode = match self.mode {
            Mode::Single => "single".to_string(),
            Mode::Compare => format!("compare {}/{MAX_COMPARED_FUNDS}", self.selected.len()),
        };
        let sort = match self.table.sort {
            Some((column, direction)) => format!("{} {}", sort_label(column), direction_label(direction)),
            None => "none".to_string(),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("fv", Style::default().fg(Color::Cyan)),
                Span::raw(" - monthly fund variations"),
            ]),
            Line::from(Span::styled(
                format!(
                    "mode: {mode} | range: {} | chart: {} | risk: {} | search: '{}' | sort: {sort}",
                    crate::report::fmt_query(&self.query),
                    chart_label(self.chart),
                    risk_filter_label(self.risk_filter),
                    self.table.search,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(0)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(9)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        self.draw_funds(frame, left[0]);
        self.draw_statistics(frame, left[1]);
        self.draw_chart(frame, right[0]);
        self.draw_table(frame, right[1]);
    }

    fn draw_funds(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .funds
            .iter()
            .map(|fund| {
                let mark = match self.mode {
                    Mode::Compare => match self.selected.iter().position(|f| f.id == fund.id) {
                        Some(i) => format!("[{}] ", i + 1),
                        None => "[ ] ".to_string(),
                    },
                    Mode::Single => {
                        if self.current.as_ref().is_some_and(|f| f.id == fund.id) {
                            "* ".to_string()
                        } else {
                            "  ".to_string()
                        }
                    }
                };
                ListItem::new(format!("{mark}{} ({})", fund.name, fund.risk_label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Funds").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !self.funds.is_empty() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);

        if let Some(field) = self.editing {
            let label = match field {
                EditField::From => "from",
                EditField::To => "to",
                EditField::Search => "search",
            };
            let hint = Paragraph::new(format!("{label}: {}_", self.input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_statistics(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Statistics").borders(Borders::ALL);
        let lines: Vec<Line> = match &self.view {
            None => vec![Line::from("-")],
            Some(View::Fund(run)) => match &run.statistics {
                Some(stats) => vec![
                    Line::from(format!("average    {}%", fmt_pct(stats.average_percent))),
                    Line::from(format!(
                        "best       {} ({}%)",
                        stats.best_month.month,
                        fmt_pct(stats.best_month.variation_percent)
                    )),
                    Line::from(format!(
                        "worst      {} ({}%)",
                        stats.worst_month.month,
                        fmt_pct(stats.worst_month.variation_percent)
                    )),
                    Line::from(format!("volatility {:.2}%", stats.volatility_percent)),
                    Line::from(format!(
                        "months     {} up / {} down",
                        stats.positive_month_count, stats.negative_month_count
                    )),
                ],
                None => vec![Line::from("no months")],
            },
            Some(View::Comparison(run)) => run
                .set
                .entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let text = match entry.statistics() {
                        Some(stats) => format!(
                            "{} avg {}% vol {:.2}%",
                            entry.fund.name,
                            fmt_pct(stats.average_percent),
                            stats.volatility_percent
                        ),
                        None => format!("{} no data", entry.fund.name),
                    };
                    Line::from(Span::styled(text, Style::default().fg(palette_color(i))))
                })
                .collect(),
        };
        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Monthly variation (%)").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = &self.view else {
            let msg = Paragraph::new("No data yet.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (months, series, y_bounds) = chart_data(view);
        if months.is_empty() {
            return;
        }

        let (chart_rect, insets) = chart_layout(inner);
        let widget = VariationChart {
            months: &months,
            series: &series,
            kind: self.chart,
            y_bounds,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &months, y_bounds);
        }
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Months").borders(Borders::ALL);
        let Some(view) = &self.view else {
            frame.render_widget(block, area);
            return;
        };

        let (header, rows) = table_rows(view, &self.table);
        let columns = header.len();
        let header = Row::new(header.into_iter().map(Cell::from))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let body = rows.into_iter().map(|(month, values)| {
            let mut cells = vec![Cell::from(month.to_string())];
            cells.extend(values.into_iter().map(|v| match v {
                Some(v) => Cell::from(fmt_pct(v)).style(Style::default().fg(value_color(v))),
                None => Cell::from("-").style(Style::default().fg(Color::DarkGray)),
            }));
            Row::new(cells)
        });

        let mut widths = vec![Constraint::Length(9)];
        widths.extend(std::iter::repeat_n(Constraint::Length(16), columns.saturating_sub(1)));
        let table = Table::new(body, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ move  Enter select  c compare  r risk  f/t dates  g chart  / search  x clear  m/v sort  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Header labels and `(month, values)` rows for the month table.
fn table_rows(view: &View, table: &TableView) -> (Vec<String>, Vec<(MonthKey, Vec<Option<f64>>)>) {
    match view {
        View::Fund(run) => {
            let rows = table
                .apply(&run.variations)
                .into_iter()
                .map(|v| (v.month, vec![Some(v.variation_percent)]))
                .collect();
            (vec!["month".to_string(), "variation %".to_string()], rows)
        }
        View::Comparison(run) => {
            let mut header = vec!["month".to_string()];
            header.extend(run.chart.series.iter().map(|s| s.label.clone()));
            (header, comparison_rows(run, table))
        }
    }
}

/// Comparison grid rows after search and sort.
///
/// Sorting by variation uses the first selected fund; months it lacks go last.
fn comparison_rows(run: &ComparisonRun, table: &TableView) -> Vec<(MonthKey, Vec<Option<f64>>)> {
    let needle = table.search.trim().to_lowercase();
    let mut rows: Vec<(MonthKey, Vec<Option<f64>>)> = run
        .chart
        .months
        .iter()
        .enumerate()
        .filter(|(_, m)| needle.is_empty() || m.to_string().to_lowercase().contains(&needle))
        .map(|(i, m)| (*m, run.chart.series.iter().map(|s| s.values[i]).collect()))
        .collect();

    match table.sort {
        Some((SortColumn::Month, SortDirection::Desc)) => rows.reverse(),
        Some((SortColumn::Variation, direction)) => {
            rows.sort_by(|a, b| {
                let key = |r: &(MonthKey, Vec<Option<f64>>)| r.1.first().copied().flatten();
                match (key(a), key(b)) {
                    (Some(x), Some(y)) => {
                        let ord = x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal);
                        match direction {
                            SortDirection::Asc => ord,
                            SortDirection::Desc => ord.reverse(),
                        }
                    }
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }
        _ => {}
    }
    rows
}

/// Month axis, plotted series and padded y bounds for the current view.
fn chart_data(view: &View) -> (Vec<MonthKey>, Vec<ChartSeries>, [f64; 2]) {
    let (months, series): (Vec<MonthKey>, Vec<ChartSeries>) = match view {
        View::Fund(run) => (
            run.variations.iter().map(|v| v.month).collect(),
            vec![ChartSeries {
                label: run.fund.name.clone(),
                color: palette_rgb(0),
                values: run.variations.iter().map(|v| Some(v.variation_percent)).collect(),
            }],
        ),
        View::Comparison(run) => (
            run.chart.months.clone(),
            run.chart
                .series
                .iter()
                .enumerate()
                .map(|(i, s)| ChartSeries {
                    label: s.label.clone(),
                    color: palette_rgb(i),
                    values: s.values.clone(),
                })
                .collect(),
        ),
    };

    // Bars grow from zero, so zero always stays in range.
    let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
    for v in series.iter().flat_map(|s| s.values.iter().flatten()) {
        y_min = y_min.min(*v);
        y_max = y_max.max(*v);
    }
    if y_max <= y_min {
        y_min = -1.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    (months, series, [y_min - pad, y_max + pad])
}

fn palette_rgb(i: usize) -> RGBColor {
    let (r, g, b) = PALETTE[i % PALETTE.len()];
    RGBColor(r, g, b)
}

fn palette_color(i: usize) -> Color {
    let (r, g, b) = PALETTE[i % PALETTE.len()];
    Color::Rgb(r, g, b)
}

fn value_color(v: f64) -> Color {
    if v > 0.0 {
        Color::Green
    } else if v < 0.0 {
        Color::Red
    } else {
        Color::Gray
    }
}

fn chart_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "line",
        ChartKind::Bar => "bar",
    }
}

fn sort_label(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Month => "month",
        SortColumn::Variation => "variation",
    }
}

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}

fn risk_filter_label(risk: Option<RiskType>) -> &'static str {
    risk.map(RiskType::display_name).unwrap_or("all")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Month labels under the chart (first, middle, last) and percent ticks on the left.
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    months: &[MonthKey],
    y_bounds: [f64; 2],
) {
    let style = Style::default().fg(Color::Gray);
    let n = months.len();

    let y = chart.y + chart.height;
    if y < inner.y + inner.height - 1 {
        let mut picks = vec![0, n / 2, n - 1];
        picks.dedup();
        for i in picks {
            // Month slot i is centred at i within [-0.5, n - 0.5].
            let u = (i as f64 + 0.5) / n as f64;
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = months[i].to_string();
            let label_len = label.len() as u16;
            let start = x
                .saturating_sub(label_len / 2)
                .min((chart.x + chart.width).saturating_sub(label_len));
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    let ticks = 5usize;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.1}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("month")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("%").style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
