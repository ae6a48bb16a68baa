//! Ratatui-based terminal UI.
//!
//! Two tabs under one controller: the current global snapshot (bar charts,
//! a proportion panel, summary cards) and the full historical series (line
//! chart plus latest-point cards). Each tab owns a fetch slot; the event loop
//! polls the active slot and redraws on state changes.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph},
};

use crate::cli::FetchArgs;
use crate::data::{CovidClient, GlobalSnapshot};
use crate::domain::{ChartPoint, NamedValue, ViewSelector};
use crate::error::AppError;
use crate::fetch::{FetchSlot, FetchState};
use crate::report::{format_compact, format_count, format_updated};
use crate::transform;

mod line_chart;
mod theme;

use line_chart::HistoryChart;

/// Start the TUI.
pub fn run(args: FetchArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args.client());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

struct App {
    client: CovidClient,
    view: ViewSelector,
    current: FetchSlot<GlobalSnapshot>,
    history: FetchSlot<Vec<ChartPoint>>,
    status: String,
}

impl App {
    fn new(client: CovidClient) -> Self {
        let mut app = Self {
            client,
            view: ViewSelector::default(),
            current: FetchSlot::new(),
            history: FetchSlot::new(),
            status: String::new(),
        };
        app.start_active_fetch();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_active() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') | KeyCode::Char('c') => self.select(ViewSelector::Current),
            KeyCode::Char('2') | KeyCode::Char('h') => self.select(ViewSelector::Historical),
            KeyCode::Tab => self.select(self.view.toggle()),
            KeyCode::Char('r') => self.start_active_fetch(),
            _ => {}
        }
        false
    }

    /// Switch tabs. The departed view's data and any in-flight request are
    /// discarded; entering a view always starts a fresh fetch.
    fn select(&mut self, view: ViewSelector) {
        if view == self.view {
            return;
        }
        match self.view {
            ViewSelector::Current => self.current.reset(),
            ViewSelector::Historical => self.history.reset(),
        }
        self.view = view;
        self.start_active_fetch();
    }

    fn start_active_fetch(&mut self) {
        let client = self.client.clone();
        match self.view {
            ViewSelector::Current => {
                self.status = "Fetching global snapshot...".to_string();
                self.current.start(move || client.fetch_snapshot());
            }
            ViewSelector::Historical => {
                self.status = "Fetching historical series...".to_string();
                self.history.start(move || {
                    let series = client.fetch_historical()?;
                    transform::normalize_history(&series)
                });
            }
        }
    }

    fn poll_active(&mut self) -> bool {
        let changed = match self.view {
            ViewSelector::Current => self.current.poll(),
            ViewSelector::Historical => self.history.poll(),
        };
        if changed {
            self.status = self.active_status();
        }
        changed
    }

    fn active_status(&self) -> String {
        match self.view {
            ViewSelector::Current => match self.current.state() {
                FetchState::Ready(snapshot) => {
                    format!("Snapshot updated {}", format_updated(snapshot.updated))
                }
                FetchState::Failed(err) => format!("{err} (press r to retry)"),
                FetchState::Loading => "Fetching global snapshot...".to_string(),
                FetchState::Idle => String::new(),
            },
            ViewSelector::Historical => match self.history.state() {
                FetchState::Ready(points) => match points.last() {
                    Some(latest) => format!("History through {}", latest.date),
                    None => "History is empty".to_string(),
                },
                FetchState::Failed(err) => format!("{err} (press r to retry)"),
                FetchState::Loading => "Fetching historical series...".to_string(),
                FetchState::Idle => String::new(),
            },
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
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("epiwatch", Style::default().fg(Color::Cyan)),
            Span::raw(" | global COVID-19 statistics (disease.sh)"),
        ]));

        let tab = |view: ViewSelector, key: &str| -> Span<'static> {
            let label = format!(" [{key}] {} ", view.title());
            if view == self.view {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::White)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(theme::DIM))
            }
        };
        lines.push(Line::from(vec![
            tab(ViewSelector::Current, "1"),
            Span::raw("  "),
            tab(ViewSelector::Historical, "2"),
        ]));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        match self.view {
            ViewSelector::Current => match self.current.state() {
                FetchState::Ready(snapshot) => self.draw_snapshot(frame, area, snapshot),
                state => draw_placeholder(frame, area, state_hint(state)),
            },
            ViewSelector::Historical => match self.history.state() {
                FetchState::Ready(points) => self.draw_history(frame, area, points),
                state => draw_placeholder(frame, area, state_hint(state)),
            },
        }
    }

    fn draw_snapshot(&self, frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &GlobalSnapshot) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        draw_bar_chart(
            frame,
            charts[0],
            "Total Statistics",
            &transform::total_stats(snapshot),
        );
        draw_distribution(frame, charts[1], &transform::distribution(snapshot));
        draw_bar_chart(
            frame,
            charts[2],
            "Today's Statistics",
            &transform::today_stats(snapshot),
        );

        draw_cards(
            frame,
            rows[1],
            &[
                ("Total Cases", snapshot.cases),
                ("Total Deaths", snapshot.deaths),
                ("Total Recovered", snapshot.recovered),
                ("Active", snapshot.active),
            ],
        );
    }

    fn draw_history(&self, frame: &mut ratatui::Frame<'_>, area: Rect, points: &[ChartPoint]) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        let block = Block::default()
            .title("COVID-19 Historical Data")
            .borders(Borders::ALL);
        let inner = block.inner(rows[0]);
        frame.render_widget(block, rows[0]);
        frame.render_widget(Clear, inner);

        let Some(latest) = points.last() else {
            let msg = Paragraph::new("The feed returned no historical points.")
                .style(Style::default().fg(theme::WARN));
            frame.render_widget(msg, inner);
            return;
        };

        let (cases, deaths, recovered, x_bounds, y_bounds) = history_series(points);
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        let widget = HistoryChart {
            cases: &cases,
            deaths: &deaths,
            recovered: &recovered,
            dates: &dates,
            x_bounds,
            y_bounds,
        };
        frame.render_widget(widget, inner);

        // The last point of the normalized sequence is the "latest" summary.
        draw_cards(
            frame,
            rows[1],
            &[
                ("Total Cases", latest.cases),
                ("Total Deaths", latest.deaths),
                ("Total Recovered", latest.recovered),
            ],
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2 or Tab switch view  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(theme::DIM)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(theme::WARN)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Loading/error/idle copy for a view body.
fn state_hint<T>(state: &FetchState<T>) -> (String, Color) {
    match state {
        FetchState::Failed(err) => (
            format!("Failed to load COVID-19 data.\n\n{err}\n\nPress r to retry."),
            theme::CASES,
        ),
        _ => ("Loading COVID-19 data...".to_string(), theme::WARN),
    }
}

fn draw_placeholder(frame: &mut ratatui::Frame<'_>, area: Rect, hint: (String, Color)) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (message, color) = hint;
    let p = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    let centered = Rect {
        x: inner.x,
        y: inner.y + inner.height / 3,
        width: inner.width,
        height: inner.height.saturating_sub(inner.height / 3),
    };
    frame.render_widget(p, centered);
}

fn draw_bar_chart(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, values: &[NamedValue]) {
    let bars: Vec<Bar<'_>> = values
        .iter()
        .map(|nv| {
            Bar::default()
                .label(Line::from(nv.label))
                .value(nv.value)
                .text_value(format_compact(nv.value))
                .style(Style::default().fg(theme::metric_color(nv.label)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn draw_distribution(frame: &mut ratatui::Frame<'_>, area: Rect, values: &[NamedValue]) {
    let block = Block::default()
        .title("Cases Distribution")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total: u64 = values.iter().map(|nv| nv.value).sum();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, values.len().max(1) as u32); values.len()])
        .split(inner);

    for (nv, row) in values.iter().zip(rows.iter()) {
        let ratio = if total > 0 {
            (nv.value as f64 / total as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .block(Block::default().title(nv.label))
            .gauge_style(Style::default().fg(theme::metric_color(nv.label)))
            .ratio(ratio)
            .label(format!(
                "{:.1}% ({})",
                ratio * 100.0,
                format_compact(nv.value)
            ));
        frame.render_widget(gauge, *row);
    }
}

fn draw_cards(frame: &mut ratatui::Frame<'_>, area: Rect, cards: &[(&'static str, u64)]) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, cards.len().max(1) as u32);
            cards.len()
        ])
        .split(area);

    for ((label, value), rect) in cards.iter().zip(chunks.iter()) {
        let number = Span::styled(
            format_count(*value),
            Style::default()
                .fg(theme::metric_color(label))
                .add_modifier(Modifier::BOLD),
        );
        let card = Paragraph::new(Line::from(number))
            .alignment(Alignment::Center)
            .block(Block::default().title(*label).borders(Borders::ALL));
        frame.render_widget(card, *rect);
    }
}

/// Build the three index-keyed line series and their bounds.
fn history_series(
    points: &[ChartPoint],
) -> (
    Vec<(f64, f64)>,
    Vec<(f64, f64)>,
    Vec<(f64, f64)>,
    [f64; 2],
    [f64; 2],
) {
    let cases: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.cases as f64))
        .collect();
    let deaths: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.deaths as f64))
        .collect();
    let recovered: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.recovered as f64))
        .collect();

    let x_max = points.len().saturating_sub(1).max(1) as f64;

    let mut y_max = 0.0_f64;
    for p in points {
        y_max = y_max
            .max(p.cases as f64)
            .max(p.deaths as f64)
            .max(p.recovered as f64);
    }
    let y_bounds = [0.0, (y_max * 1.05).max(1.0)];

    (cases, deaths, recovered, [0.0, x_max], y_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_series_keeps_point_order_and_pads_the_y_axis() {
        let points = vec![
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                cases: 10,
                deaths: 1,
                recovered: 5,
            },
            ChartPoint {
                date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
                cases: 12,
                deaths: 1,
                recovered: 6,
            },
        ];
        let (cases, deaths, recovered, x_bounds, y_bounds) = history_series(&points);
        assert_eq!(cases, vec![(0.0, 10.0), (1.0, 12.0)]);
        assert_eq!(deaths.len(), 2);
        assert_eq!(recovered.len(), 2);
        assert_eq!(x_bounds, [0.0, 1.0]);
        assert!(y_bounds[1] > 12.0);
    }
}
