// src/tui/widgets/personas.rs — Persona picker with difficulty filter.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::tui::theme::Theme;
use crate::view::PersonaListView;

pub fn render(f: &mut Frame, area: Rect, data: &PersonaListView, state: &mut TableState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_table(f, chunks[0], data, state);
    render_detail(f, chunks[1], data, state.selected());
}

fn render_table(f: &mut Frame, area: Rect, data: &PersonaListView, state: &mut TableState) {
    let header = Row::new(vec![
        Cell::from("Name").style(Theme::table_header()),
        Cell::from("Specialty").style(Theme::table_header()),
        Cell::from("Experience").style(Theme::table_header()),
        Cell::from("Difficulty").style(Theme::table_header()),
    ]);

    let rows: Vec<Row> = data
        .personas
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()).style(Theme::text()),
                Cell::from(p.specialty.clone()).style(Theme::text_dim()),
                Cell::from(p.experience.clone()).style(Theme::text_dim()),
                Cell::from(p.difficulty.as_str()).style(Theme::difficulty(p.difficulty)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let filter = data.filter.map_or("All levels", |d| d.as_str());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Choose Your Practice Partner ({}) | filter: {} ",
                    data.personas.len(),
                    filter
                ))
                .borders(Borders::ALL)
                .border_style(Theme::border_focus()),
        )
        .row_highlight_style(Theme::table_selected())
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, state);
}

fn render_detail(f: &mut Frame, area: Rect, data: &PersonaListView, selected: Option<usize>) {
    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let Some(card) = selected.and_then(|i| data.personas.get(i)) else {
        let p = Paragraph::new(Line::from(Span::styled(
            "  No personas match this filter.",
            Theme::text_dim(),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(card.name.clone(), Theme::header()),
            Span::styled(
                format!("  [{}]", card.difficulty),
                Theme::difficulty(card.difficulty).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Personality:  ", Theme::text_dim()),
            Span::styled(card.personality.clone(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Context:      ", Theme::text_dim()),
            Span::styled(card.context.clone(), Theme::text()),
        ]),
    ];
    if !card.objections.is_empty() {
        lines.push(Line::from(Span::styled("Typical objections:", Theme::text_dim())));
        for o in &card.objections {
            lines.push(Line::from(Span::styled(format!("  - {o}"), Theme::warning())));
        }
    }

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
