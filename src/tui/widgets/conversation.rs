// src/tui/widgets/conversation.rs — Transcript and message input.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::session::MessageRole;
use crate::tui::theme::Theme;
use crate::view::ConversationView;

pub fn render(
    f: &mut Frame,
    area: Rect,
    data: &ConversationView,
    input: &str,
    pending: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    render_transcript(f, chunks[0], data, pending);
    render_input(f, chunks[1], input, pending.is_some());
}

fn render_transcript(f: &mut Frame, area: Rect, data: &ConversationView, pending: Option<&str>) {
    let title = match &data.persona {
        Some(p) => format!(
            " {} | {} | {} | exchanges: {} ",
            p.name, p.specialty, p.difficulty, data.exchange_count
        ),
        None => " Conversation ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = Vec::new();
    for m in &data.messages {
        let speaker_style = match m.role {
            MessageRole::User => Theme::speaker_user(),
            MessageRole::Counterpart => Theme::speaker_counterpart(),
        };
        lines.push(Line::from(vec![
            Span::styled(m.speaker.clone(), speaker_style),
            Span::styled(format!("  {}", m.time), Theme::text_dim()),
        ]));
        lines.push(Line::from(Span::styled(m.content.clone(), Theme::text())));
        lines.push(Line::from(""));
    }
    if let Some(note) = pending {
        lines.push(Line::from(Span::styled(note.to_string(), Theme::text_dim())));
    }

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    let scroll = tail_scroll(&p, area);
    f.render_widget(p.scroll((scroll, 0)), area);
}

/// Rows to skip so the last wrapped row sits at the bottom of `area`.
/// The count includes the block's top and bottom borders; wrapping is
/// measured against the interior width.
fn tail_scroll(p: &Paragraph, area: Rect) -> u16 {
    let rows = p.line_count(area.width.saturating_sub(2));
    u16::try_from(rows.saturating_sub(area.height as usize)).unwrap_or(u16::MAX)
}

fn render_input(f: &mut Frame, area: Rect, input: &str, busy: bool) {
    let border = if busy {
        Theme::border()
    } else {
        Theme::border_focus()
    };
    let block = Block::default()
        .title(" Your message ")
        .borders(Borders::ALL)
        .border_style(border);

    let p = Paragraph::new(Line::from(vec![
        Span::styled("> ", Theme::key_hint()),
        Span::styled(input.to_string(), Theme::text()),
    ]))
    .block(block);
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MessageView;
    use ratatui::{backend::TestBackend, Terminal};

    fn message(role: MessageRole, content: &str) -> MessageView {
        MessageView {
            role,
            speaker: match role {
                MessageRole::User => "You".into(),
                MessageRole::Counterpart => "Dr. Sarah Chen".into(),
            },
            content: content.into(),
            time: "09:30:00".into(),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_newest_wrapped_reply_stays_visible() {
        let long = "What kind of monitoring is required? I need to understand \
                    the practical implications for my practice before I commit.";
        let data = ConversationView {
            persona: None,
            messages: vec![
                message(MessageRole::Counterpart, long),
                message(MessageRole::User, "Monitoring is minimal."),
                message(MessageRole::Counterpart, &format!("{long} lastword")),
            ],
            exchange_count: 1,
        };

        let mut terminal = Terminal::new(TestBackend::new(32, 14)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), &data, "", None))
            .unwrap();
        assert!(screen_text(&terminal).contains("lastword"));
    }

    #[test]
    fn test_short_transcript_is_not_scrolled() {
        let p = Paragraph::new(vec![Line::from("hi"), Line::from("there")])
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        assert_eq!(tail_scroll(&p, Rect::new(0, 0, 20, 10)), 0);
    }

    #[test]
    fn test_scroll_counts_wrapped_rows() {
        let p = Paragraph::new(vec![Line::from("word ".repeat(20))])
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        // 100 columns of text in an 8-column interior wraps to many rows.
        assert!(tail_scroll(&p, Rect::new(0, 0, 10, 5)) > 0);
    }
}
