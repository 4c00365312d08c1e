// Interactive terminal presenter (ratatui)
//
// Key presses become SessionEvents; the session only changes through
// `session::transition`. Page and cursor positions are presenter-local.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::debug;

use super::format::{bar, money, percent, truncate};
use super::{Presenter, PresenterKind};
use crate::aggregator::RollingStats;
use crate::dashboard::{Dashboard, Detail, SeriesKind};
use crate::normalizer::{day_label, month_label};
use crate::session::{transition, SessionEvent, SessionState};

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    NetWorth,
    Composition,
    Expenses,
    Breakdown,
    Statistics,
}

impl Page {
    const ALL: [Page; 5] = [
        Page::NetWorth,
        Page::Composition,
        Page::Expenses,
        Page::Breakdown,
        Page::Statistics,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::NetWorth => Page::Composition,
            Page::Composition => Page::Expenses,
            Page::Expenses => Page::Breakdown,
            Page::Breakdown => Page::Statistics,
            Page::Statistics => Page::NetWorth,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::NetWorth => Page::Statistics,
            Page::Composition => Page::NetWorth,
            Page::Expenses => Page::Composition,
            Page::Breakdown => Page::Expenses,
            Page::Statistics => Page::Breakdown,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::NetWorth => "Net Worth",
            Page::Composition => "Assets",
            Page::Expenses => "Expenses",
            Page::Breakdown => "Breakdown",
            Page::Statistics => "Statistics",
        }
    }
}

/// What a key press asks the run loop to do
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Quit,
    Event(SessionEvent),
    /// Presenter-local change only (page, cursor), or nothing at all
    Redraw,
}

pub struct TerminalPresenter {
    page: Page,
    /// Selected point on the net worth and asset pages
    net_worth_cursor: usize,
    /// Selected month on the expense trend page
    expense_cursor: usize,
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPresenter {
    pub fn new() -> Self {
        TerminalPresenter {
            page: Page::NetWorth,
            net_worth_cursor: 0,
            expense_cursor: 0,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Park both cursors on the latest point
    fn reset(&mut self, dashboard: &Dashboard) {
        self.net_worth_cursor = dashboard.net_worth().len().saturating_sub(1);
        self.expense_cursor = dashboard.expenses().len().saturating_sub(1);
    }

    pub fn handle_key(
        &mut self,
        code: KeyCode,
        dashboard: &Dashboard,
        session: &SessionState,
    ) -> KeyOutcome {
        if session.is_detail() {
            return match code {
                KeyCode::Char('q') => KeyOutcome::Quit,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => {
                    KeyOutcome::Event(SessionEvent::BackToDashboard)
                }
                _ => KeyOutcome::Redraw,
            };
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Tab => {
                self.page = self.page.next();
                KeyOutcome::Redraw
            }
            KeyCode::BackTab => {
                self.page = self.page.previous();
                KeyOutcome::Redraw
            }
            KeyCode::Char('w') => KeyOutcome::Event(SessionEvent::WindowSelected {
                window: session.window.toggled(),
            }),
            KeyCode::Enter => self.select_point(dashboard, session),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                self.step(dashboard, session, false)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                self.step(dashboard, session, true)
            }
            KeyCode::Home => {
                self.net_worth_cursor = 0;
                self.expense_cursor = 0;
                KeyOutcome::Redraw
            }
            KeyCode::End => {
                self.reset(dashboard);
                KeyOutcome::Redraw
            }
            _ => KeyOutcome::Redraw,
        }
    }

    fn step(&mut self, dashboard: &Dashboard, session: &SessionState, forward: bool) -> KeyOutcome {
        match self.page {
            Page::NetWorth | Page::Composition => {
                self.net_worth_cursor =
                    step_cursor(self.net_worth_cursor, dashboard.net_worth().len(), forward);
                KeyOutcome::Redraw
            }
            Page::Expenses => {
                self.expense_cursor =
                    step_cursor(self.expense_cursor, dashboard.expenses().len(), forward);
                KeyOutcome::Redraw
            }
            Page::Breakdown => session
                .breakdown_month
                .and_then(|month| dashboard.step_month(month, forward))
                .map(|month| KeyOutcome::Event(SessionEvent::MonthSelected { month }))
                .unwrap_or(KeyOutcome::Redraw),
            Page::Statistics => KeyOutcome::Redraw,
        }
    }

    fn select_point(&self, dashboard: &Dashboard, session: &SessionState) -> KeyOutcome {
        let selection = match self.page {
            Page::NetWorth | Page::Composition => dashboard
                .net_worth()
                .records()
                .get(self.net_worth_cursor)
                .map(|r| (SeriesKind::NetWorth, r.date)),
            Page::Expenses => dashboard
                .expenses()
                .records()
                .get(self.expense_cursor)
                .map(|r| (SeriesKind::Expenses, r.date)),
            Page::Breakdown => session.breakdown_month.map(|m| (SeriesKind::Expenses, m)),
            Page::Statistics => None,
        };

        match selection {
            Some((series, date)) => KeyOutcome::Event(SessionEvent::PointSelected { series, date }),
            None => KeyOutcome::Redraw,
        }
    }

    fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        dashboard: &Dashboard,
        session: &mut SessionState,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f, dashboard, session))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.handle_key(key.code, dashboard, session) {
                    KeyOutcome::Quit => return Ok(()),
                    KeyOutcome::Event(event) => *session = transition(session, &event),
                    KeyOutcome::Redraw => {}
                }
            }
        }
    }

    fn draw(&self, f: &mut Frame, dashboard: &Dashboard, session: &SessionState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Page tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Key hints
            ])
            .split(f.size());

        render_header(f, chunks[0], self.page, session);

        match session.detail(dashboard) {
            Some(detail) => render_detail(f, chunks[1], &detail),
            None if session.is_detail() => {
                let missing = Paragraph::new("  No record found for the selected point.")
                    .block(titled_block(" Details ", Color::Yellow));
                f.render_widget(missing, chunks[1]);
            }
            None => match self.page {
                Page::NetWorth => render_net_worth(f, chunks[1], dashboard, self.net_worth_cursor),
                Page::Composition => {
                    render_composition(f, chunks[1], dashboard, self.net_worth_cursor)
                }
                Page::Expenses => render_expenses(f, chunks[1], dashboard, self.expense_cursor),
                Page::Breakdown => render_breakdown(f, chunks[1], dashboard, session),
                Page::Statistics => {
                    let stats = dashboard.stats(session.window);
                    let paragraph = Paragraph::new(stats_lines(&stats))
                        .block(titled_block(" Key Statistics ", Color::White));
                    f.render_widget(paragraph, chunks[1]);
                }
            },
        }

        render_status_bar(f, chunks[2], self.page, session);
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, dashboard: &Dashboard, session: &mut SessionState) -> Result<()> {
        self.reset(dashboard);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run(&mut terminal, dashboard, session);

        // Restore terminal before reporting anything
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        debug!(page = self.page.title(), "terminal presenter closed");
        res
    }

    fn kind(&self) -> PresenterKind {
        PresenterKind::Interactive
    }
}

fn step_cursor(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

/// Y-axis bounds with a little headroom
fn value_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.05).max(1.0);
    [min - pad, max + pad]
}

fn titled_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn label_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn render_header(f: &mut Frame, area: Rect, current: Page, session: &SessionState) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        session.window.label().to_string(),
        Style::default().fg(Color::White),
    ));
    if let Some(month) = session.breakdown_month {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(month_label(month), Style::default().fg(Color::Green)));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Personal Finance Dashboard "),
    );

    f.render_widget(header, area);
}

fn x_labels(first: Option<String>, last: Option<String>) -> Vec<Span<'static>> {
    vec![
        Span::raw(first.unwrap_or_default()),
        Span::raw(last.unwrap_or_default()),
    ]
}

fn render_net_worth(f: &mut Frame, area: Rect, dashboard: &Dashboard, cursor: usize) {
    let records = dashboard.net_worth().records();
    let points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.net_worth))
        .collect();
    let selected: Vec<(f64, f64)> = points.get(cursor).copied().into_iter().collect();

    let y = value_bounds(records.iter().map(|r| r.net_worth));
    let title = match records.get(cursor) {
        Some(r) => format!(" Net Worth Over Time  ·  {}: {} ", day_label(r.date), money(r.net_worth)),
        None => " Net Worth Over Time ".to_string(),
    };

    let datasets = vec![
        Dataset::default()
            .name("Net Worth")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&selected),
    ];

    let chart = Chart::new(datasets)
        .block(titled_block(&title, Color::White))
        .x_axis(
            Axis::default()
                .bounds([0.0, points.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels(
                    dashboard.net_worth().first_date().map(day_label),
                    dashboard.net_worth().last_date().map(day_label),
                )),
        )
        .y_axis(
            Axis::default()
                .bounds(y)
                .labels(vec![Span::raw(money(y[0])), Span::raw(money(y[1]))]),
        );

    f.render_widget(chart, area);
}

fn render_composition(f: &mut Frame, area: Rect, dashboard: &Dashboard, cursor: usize) {
    let composition = dashboard.composition();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // Each line sits on top of the ones before it
    let stacked = composition.stacked();
    let series: Vec<Vec<(f64, f64)>> = (0..composition.assets.len())
        .map(|col| {
            stacked
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, p.values.get(col).copied().unwrap_or(0.0)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = composition
        .assets
        .iter()
        .zip(&series)
        .enumerate()
        .map(|(i, (asset, data))| {
            Dataset::default()
                .name(asset.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                .data(data)
        })
        .collect();

    let y = value_bounds(
        std::iter::once(0.0).chain(stacked.iter().flat_map(|p| p.values.iter().copied())),
    );
    let chart = Chart::new(datasets)
        .block(titled_block(" Asset Composition Over Time (stacked) ", Color::White))
        .x_axis(
            Axis::default()
                .bounds([0.0, composition.points.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels(
                    composition.points.first().map(|p| day_label(p.date)),
                    composition.points.last().map(|p| day_label(p.date)),
                )),
        )
        .y_axis(
            Axis::default()
                .bounds(y)
                .labels(vec![Span::raw(money(y[0])), Span::raw(money(y[1]))]),
        );
    f.render_widget(chart, chunks[0]);

    let header_cells = std::iter::once("Date".to_string())
        .chain(composition.assets.iter().cloned())
        .map(|h| {
            Cell::from(truncate(&h, 14)).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = composition.points.iter().map(|p| {
        let cells = std::iter::once(Cell::from(day_label(p.date)))
            .chain(p.values.iter().map(|v| Cell::from(money(*v))));
        Row::new(cells).height(1)
    });

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(14))
        .chain(composition.assets.iter().map(|_| Constraint::Length(15)))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(" Values ", Color::White))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    let mut state = TableState::default();
    if !composition.points.is_empty() {
        state.select(Some(cursor.min(composition.points.len() - 1)));
    }
    f.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_expenses(f: &mut Frame, area: Rect, dashboard: &Dashboard, cursor: usize) {
    let records = dashboard.expenses().records();
    let points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.total))
        .collect();
    let selected: Vec<(f64, f64)> = points.get(cursor).copied().into_iter().collect();

    let y = value_bounds(records.iter().map(|r| r.total));
    let title = match records.get(cursor) {
        Some(r) => format!(" Monthly Total Expenses  ·  {}: {} ", month_label(r.date), money(r.total)),
        None => " Monthly Total Expenses ".to_string(),
    };

    let datasets = vec![
        Dataset::default()
            .name("Total")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&points),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&selected),
    ];

    let chart = Chart::new(datasets)
        .block(titled_block(&title, Color::White))
        .x_axis(
            Axis::default()
                .bounds([0.0, points.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels(
                    dashboard.expenses().first_date().map(month_label),
                    dashboard.expenses().last_date().map(month_label),
                )),
        )
        .y_axis(
            Axis::default()
                .bounds(y)
                .labels(vec![Span::raw(money(y[0])), Span::raw(money(y[1]))]),
        );

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, dashboard: &Dashboard, session: &SessionState) {
    let Some(month) = session.breakdown_month else {
        let empty = Paragraph::new("  No expense months available.")
            .block(titled_block(" Expense Breakdown ", Color::White));
        f.render_widget(empty, area);
        return;
    };

    let title = format!(" Expense Breakdown for {} ", month_label(month));
    let breakdown = match dashboard.breakdown(month) {
        Ok(b) if !b.is_empty() => b,
        Ok(_) => {
            let empty = Paragraph::new(format!("  No expenses recorded for {}.", month_label(month)))
                .block(titled_block(&title, Color::White));
            f.render_widget(empty, area);
            return;
        }
        Err(err) => {
            let missing = Paragraph::new(format!("  {}", err))
                .block(titled_block(&title, Color::Red));
            f.render_widget(missing, area);
            return;
        }
    };

    let header_cells = ["Category", "Amount", "Share", ""].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let max = breakdown.slices.first().map(|s| s.value).unwrap_or(0.0);
    let rows = breakdown.slices.iter().enumerate().map(|(i, slice)| {
        let color = PALETTE[i % PALETTE.len()];
        Row::new(vec![
            Cell::from(truncate(&slice.category, 22)),
            Cell::from(money(slice.value)),
            Cell::from(percent(slice.percent)),
            Cell::from(bar(slice.value, max, 30)).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(titled_block(&title, Color::White));

    f.render_widget(table, area);
}

/// Statistics panel text, shared shape with the static report
pub fn stats_lines(stats: &RollingStats) -> Vec<Line<'static>> {
    if stats.bounds.is_none() {
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Statistics unavailable: net worth and expense data share no dates.",
                Style::default().fg(Color::Red),
            )),
        ];
    }

    let mut lines = vec![Line::from("")];

    if stats.partial_window {
        if let Some(from) = stats.available_from() {
            lines.push(Line::from(Span::styled(
                format!("  Note: Data only available from {}", month_label(from)),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(""));
        }
    }

    let (average, max, min) = stats
        .expenses
        .as_ref()
        .map(|e| (e.average_total, e.max_total, e.min_total))
        .unwrap_or((0.0, 0.0, 0.0));

    let figures = [
        ("Average Monthly Expenses", average),
        ("Total Net Worth Change", stats.net_worth.net_change),
        ("Average Monthly Net Worth Change", stats.net_worth.average_change),
        ("Maximum Monthly Expenses", max),
        ("Minimum Monthly Expenses", min),
    ];
    for (label, value) in figures {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", label), label_style()),
            Span::raw(money(value)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Top Expense Categories ({})", stats.window.label()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    lines.push(Line::from(""));

    match &stats.expenses {
        Some(summary) if !summary.top_categories.is_empty() => {
            for category in &summary.top_categories {
                lines.push(Line::from(format!(
                    "  {}: {} per month",
                    category.category,
                    money(category.average)
                )));
            }
        }
        _ => lines.push(Line::from(
            "  No expense data available for the selected time frame.",
        )),
    }

    lines
}

fn detail_lines(detail: &Detail<'_>) -> Vec<Line<'static>> {
    let heading = |text: String| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))
    };
    let entry = |label: &str, value: f64| {
        Line::from(vec![
            Span::styled(format!("  {}: ", label), label_style()),
            Span::styled(
                money(value),
                Style::default().fg(if value < 0.0 { Color::Red } else { Color::Green }),
            ),
        ])
    };

    let mut lines = vec![Line::from("")];
    match detail {
        Detail::NetWorth(record) => {
            lines.push(heading(format!("  Detailed View for {}", day_label(record.date))));
            lines.push(Line::from(""));
            lines.push(entry("Net Worth", record.net_worth));
            lines.push(Line::from(""));
            lines.push(Line::from("  Asset Breakdown:"));
            for (asset, value) in &record.assets {
                lines.push(entry(&format!("  {}", asset), *value));
            }
            lines.push(Line::from(""));
            lines.push(entry("Credit Card Balance", record.cc_balance));
        }
        Detail::Expenses(record) => {
            lines.push(heading(format!("  Detailed View for {}", month_label(record.date))));
            lines.push(Line::from(""));
            lines.push(entry("Total Expenses", record.total));
            lines.push(Line::from(""));
            lines.push(Line::from("  Category Breakdown:"));
            for (category, value) in &record.categories {
                lines.push(entry(&format!("  {}", category), *value));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press Esc to return to the dashboard",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    lines
}

fn render_detail(f: &mut Frame, area: Rect, detail: &Detail<'_>) {
    let panel = Paragraph::new(detail_lines(detail)).block(titled_block(" Details ", Color::Yellow));
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, page: Page, session: &SessionState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = vec![Span::raw(" ")];
    if session.is_detail() {
        spans.push(key("Esc"));
        spans.push(Span::raw(" Back | "));
    } else {
        spans.push(key("Tab"));
        spans.push(Span::raw(" Page | "));
        spans.push(key("←/→"));
        spans.push(Span::raw(if page == Page::Breakdown { " Month | " } else { " Point | " }));
        spans.push(key("Enter"));
        spans.push(Span::raw(" Details | "));
        spans.push(key("w"));
        spans.push(Span::raw(" Window | "));
    }
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
