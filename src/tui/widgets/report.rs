// src/tui/widgets/report.rs — Performance report after a session ends.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::tui::theme::Theme;
use crate::view::ReportView;

pub fn render(f: &mut Frame, area: Rect, data: &ReportView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_summary(f, rows[0], data);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(cols[0]);
    render_scores(f, left[0], data);
    render_insights(f, left[1], data);
    render_recommendations(f, cols[1], data);
}

fn render_summary(f: &mut Frame, area: Rect, data: &ReportView) {
    let a = &data.assessment;
    let delta_style = if data.score_delta >= 0 {
        Theme::success()
    } else {
        Theme::error()
    };
    let line = Line::from(vec![
        Span::styled("Overall ", Theme::text_dim()),
        Span::styled(
            format!("{}%", a.overall_score),
            Theme::score(a.overall_score).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({:+})", data.score_delta), delta_style),
        Span::styled("   Exchanges ", Theme::text_dim()),
        Span::styled(data.exchange_count.to_string(), Theme::text()),
        Span::styled("   Duration ", Theme::text_dim()),
        Span::styled(data.duration.clone(), Theme::text()),
        Span::styled("   Objections ", Theme::text_dim()),
        Span::styled(data.objections_raised.to_string(), Theme::text()),
        Span::styled("   Level ", Theme::text_dim()),
        Span::styled(a.skill_level.as_str(), Theme::info()),
    ]);

    let block = Block::default()
        .title(Span::styled(
            format!(" Session Complete: {} ", data.persona_name),
            Theme::header(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border_focus());
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_scores(f: &mut Frame, area: Rect, data: &ReportView) {
    let header = Row::new(vec![
        Cell::from("Competency").style(Theme::table_header()),
        Cell::from("You").style(Theme::table_header()),
        Cell::from("Team").style(Theme::table_header()),
    ]);

    let rows: Vec<Row> = data
        .categories
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.category.as_str()).style(Theme::text()),
                Cell::from(c.score.to_string()).style(Theme::score(c.score)),
                Cell::from(c.benchmark.to_string()).style(Theme::text_dim()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Skill Breakdown ")
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(table, area);
}

fn render_insights(f: &mut Frame, area: Rect, data: &ReportView) {
    let block = Block::default()
        .title(" AI Insights ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines: Vec<Line> = data
        .assessment
        .insights
        .iter()
        .map(|i| Line::from(Span::styled(format!("- {i}"), Theme::text())))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(data.coaching_note, Theme::text_dim())));

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, data: &ReportView) {
    let block = Block::default()
        .title(" Recommended Next Steps ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = vec![Line::from(Span::styled("Learning modules", Theme::header()))];
    for m in &data.assessment.modules {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", m.priority.as_str()), Theme::priority(m.priority)),
            Span::styled(m.title.clone(), Theme::text()),
            Span::styled(format!("  {} | {}", m.kind, m.duration), Theme::text_dim()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", m.description),
            Theme::text_dim(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Practice scenarios", Theme::header())));
    for s in &data.assessment.scenarios {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", s.difficulty), Theme::difficulty(s.difficulty)),
            Span::styled(s.title.clone(), Theme::text()),
            Span::styled(format!("  {}", s.duration), Theme::text_dim()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    with {}", s.personas.join(", ")),
            Theme::text_dim(),
        )));
    }

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
