mod theme;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame, Terminal,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io;

use crate::models::DATE_FORMAT;
use crate::report::DailySeries;
use crate::util::format_amount;

/// Draw the daily income/expense chart full-screen until a key is pressed.
pub(crate) fn show(series: &DailySeries) -> Result<()> {
    log::debug!(
        "plotting {} days ({:?} to {:?})",
        series.len(),
        series.first_date(),
        series.last_date()
    );
    in_terminal_session(enter_terminal, || run_chart(series), leave_terminal)
}

/// Run `body` between `enter` and `leave`. `leave` always runs, so a
/// half-finished `enter` (raw mode on, alternate screen failed) is undone too.
fn in_terminal_session(
    enter: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<()>,
    leave: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let result = enter().and_then(|()| body());
    let restored = leave();
    result.and(restored)
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    raw?;
    Ok(())
}

fn run_chart(series: &DailySeries) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    loop {
        terminal.draw(|f| {
            let area = f.area();
            render(f, area, series);
        })?;

        // Resize events fall through to a redraw.
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn render(f: &mut Frame, area: Rect, series: &DailySeries) {
    let (income, expense) = chart_points(series);
    let top = max_amount(series);
    let y_max = top.to_f64().unwrap_or(1.0).max(1.0);
    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::income_style())
            .data(&income),
        Dataset::default()
            .name("Expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::expense_style())
            .data(&expense),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style())
                .title(Span::styled(
                    " Income and Expenses over time ",
                    theme::title_style(),
                ))
                .title_bottom(Span::styled(" press any key ", theme::dim_style())),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(theme::dim_style())
                .bounds([0.0, x_max])
                .labels(x_labels(series)),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(theme::dim_style())
                .bounds([0.0, y_max])
                .labels(y_labels(top)),
        )
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(chart, area);
}

/// Chart coordinates: x is the day offset from the first day, y the amount.
pub(crate) fn chart_points(series: &DailySeries) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64;
            (
                (x, p.income.to_f64().unwrap_or(0.0)),
                (x, p.expense.to_f64().unwrap_or(0.0)),
            )
        })
        .unzip()
}

/// Largest single-day income or expense.
pub(crate) fn max_amount(series: &DailySeries) -> Decimal {
    series
        .points
        .iter()
        .map(|p| p.income.max(p.expense))
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// First, middle and last day of the series.
pub(crate) fn x_labels(series: &DailySeries) -> Vec<String> {
    let n = series.len();
    let mut idx = vec![0, n / 2, n.saturating_sub(1)];
    idx.dedup();
    idx.into_iter()
        .filter_map(|i| series.points.get(i))
        .map(|p| p.date.format(DATE_FORMAT).to_string())
        .collect()
}

pub(crate) fn y_labels(top: Decimal) -> Vec<String> {
    let two = Decimal::from(2);
    vec![
        format_amount(Decimal::ZERO),
        format_amount((top / two).round_dp(2)),
        format_amount(top),
    ]
}

#[cfg(test)]
mod tests;
