// src/tui/widgets/dashboard.rs — Home screen: counters, learning path, analytics.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::tui::theme::Theme;
use crate::view::{AnalyticsView, DashboardView};

pub fn render(f: &mut Frame, area: Rect, data: &DashboardView, analytics: &AnalyticsView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    render_stats(f, rows[0], data);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(cols[0]);
    render_activity(f, left[0], data);
    render_learning_path(f, left[1], data);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(5)])
        .split(cols[1]);
    render_trend(f, right[0], analytics);
    render_history(f, right[1], analytics);
}

fn render_stats(f: &mut Frame, area: Rect, data: &DashboardView) {
    let n = data.quick_stats.len().max(1) as u32;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n); n as usize])
        .split(area);

    for (tile, cell) in data.quick_stats.iter().zip(cells.iter()) {
        let block = Block::default()
            .title(format!(" {} ", tile.label))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let line = Line::from(vec![
            Span::styled(tile.value, Theme::header()),
            Span::styled(format!("  {}", tile.delta), Theme::success()),
        ]);
        f.render_widget(Paragraph::new(line).block(block), *cell);
    }
}

fn render_activity(f: &mut Frame, area: Rect, data: &DashboardView) {
    let block = Block::default()
        .title(" Recent Activity ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines: Vec<Line> = data
        .recent_activity
        .iter()
        .map(|a| {
            Line::from(vec![
                Span::styled(a.title, Theme::text()),
                Span::styled(format!("  {}", a.detail), Theme::text_dim()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_learning_path(f: &mut Frame, area: Rect, data: &DashboardView) {
    let block = Block::default()
        .title(" Your Learning Path ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = Vec::new();
    for card in &data.learning_path {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", card.priority.as_str()),
                Theme::priority(card.priority),
            ),
            Span::styled(card.title, Theme::text()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", card.description),
            Theme::text_dim(),
        )));
    }

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn render_trend(f: &mut Frame, area: Rect, analytics: &AnalyticsView) {
    let block = Block::default()
        .title(" Performance Trend ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let width = area.width.saturating_sub(14) as usize;
    let lines: Vec<Line> = analytics
        .trend
        .iter()
        .map(|p| {
            Line::from(vec![
                Span::styled(format!("{:<3} ", p.week), Theme::text_dim()),
                Span::styled(bar(p.score, width), Theme::score(p.score)),
                Span::styled(format!(" {}", p.score), Theme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(f: &mut Frame, area: Rect, analytics: &AnalyticsView) {
    let header = Row::new(vec![
        Cell::from("Date").style(Theme::table_header()),
        Cell::from("Persona").style(Theme::table_header()),
        Cell::from("Scenario").style(Theme::table_header()),
        Cell::from("Time").style(Theme::table_header()),
        Cell::from("Score").style(Theme::table_header()),
    ]);

    let rows: Vec<Row> = analytics
        .history
        .iter()
        .map(|h| {
            Row::new(vec![
                Cell::from(h.date).style(Theme::text_dim()),
                Cell::from(h.persona).style(Theme::text()),
                Cell::from(h.scenario).style(Theme::text()),
                Cell::from(h.duration).style(Theme::text_dim()),
                Cell::from(format!("{}%", h.score)).style(Theme::score(h.score)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Session History ")
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(table, area);
}

/// Horizontal bar scaled so 100 fills `width` cells.
fn bar(score: u8, width: usize) -> String {
    let filled = usize::from(score.min(100)) * width / 100;
    "\u{2588}".repeat(filled)
}
