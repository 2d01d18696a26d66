// src/tui/app.rs — TUI application state, event loop, and rendering.
//
// The terminal holds one session. Key presses become session events, the
// coach applies them, and every frame is drawn from a fresh projection.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState, Tabs},
    Frame, Terminal,
};

use crate::persona::{Difficulty, PersonaCatalog};
use crate::session::{Coach, NavTarget, Screen, Session, SessionEvent};
use crate::view::{self, AnalyticsView, ScreenView};

use super::theme::Theme;
use super::widgets;

const SCREENS: [(Screen, &str); 4] = [
    (Screen::Dashboard, "Dashboard"),
    (Screen::PersonaList, "Personas"),
    (Screen::InConversation, "Conversation"),
    (Screen::SessionComplete, "Report"),
];

#[derive(Debug, PartialEq)]
enum Action {
    None,
    Quit,
    Dispatch(SessionEvent),
}

// ── App state ────────────────────────────────────────────────────

struct App {
    session: Session,
    filter: Option<Difficulty>,
    persona_state: TableState,
    input: String,
    /// Shown while an event is being processed.
    pending: Option<String>,
    /// Last rejected event, cleared on the next success.
    status: Option<String>,
    analytics: AnalyticsView,
}

impl App {
    fn new() -> Self {
        Self {
            session: Session::new(),
            filter: None,
            persona_state: TableState::default(),
            input: String::new(),
            pending: None,
            status: None,
            analytics: view::analytics(),
        }
    }

    fn on_key(&mut self, key: KeyEvent, catalog: &PersonaCatalog) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.session.screen() {
            Screen::Dashboard => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Char('p') | KeyCode::Enter => {
                    Action::Dispatch(SessionEvent::navigate(NavTarget::PersonaList))
                }
                _ => Action::None,
            },
            Screen::PersonaList => match key.code {
                KeyCode::Char('q') => Action::Quit,
                KeyCode::Esc | KeyCode::Char('d') => {
                    Action::Dispatch(SessionEvent::navigate(NavTarget::Dashboard))
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(catalog, 1);
                    Action::None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(catalog, -1);
                    Action::None
                }
                KeyCode::Char('f') => {
                    self.cycle_filter();
                    self.reset_selection(catalog);
                    Action::None
                }
                KeyCode::Enter => self
                    .persona_state
                    .selected()
                    .and_then(|i| view::persona_cards(catalog, self.filter).into_iter().nth(i))
                    .map_or(Action::None, |card| {
                        Action::Dispatch(SessionEvent::select_persona(card.name))
                    }),
                _ => Action::None,
            },
            Screen::InConversation => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => Action::Dispatch(SessionEvent::EndSession),
                    KeyCode::Char('s') if ctrl => Action::Dispatch(SessionEvent::SwitchPersona),
                    KeyCode::Char('d') if ctrl => {
                        Action::Dispatch(SessionEvent::navigate(NavTarget::Dashboard))
                    }
                    KeyCode::Enter => {
                        let text = std::mem::take(&mut self.input);
                        Action::Dispatch(SessionEvent::send_message(text))
                    }
                    KeyCode::Backspace => {
                        self.input.pop();
                        Action::None
                    }
                    KeyCode::Char(c) if !ctrl => {
                        self.input.push(c);
                        Action::None
                    }
                    _ => Action::None,
                }
            }
            Screen::SessionComplete => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Char('n') => Action::Dispatch(SessionEvent::RestartWithNewPersona),
                KeyCode::Char('d') | KeyCode::Enter => {
                    Action::Dispatch(SessionEvent::ReturnToDashboard)
                }
                _ => Action::None,
            },
        }
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Difficulty::Easy),
            Some(Difficulty::Easy) => Some(Difficulty::Medium),
            Some(Difficulty::Medium) => Some(Difficulty::Hard),
            Some(Difficulty::Hard) => None,
        };
    }

    fn move_selection(&mut self, catalog: &PersonaCatalog, step: isize) {
        let len = catalog.filter(self.filter).len();
        if len == 0 {
            self.persona_state.select(None);
            return;
        }
        let i = self.persona_state.selected().unwrap_or(0);
        let next = i.saturating_add_signed(step).min(len - 1);
        self.persona_state.select(Some(next));
    }

    fn reset_selection(&mut self, catalog: &PersonaCatalog) {
        let any = !catalog.filter(self.filter).is_empty();
        self.persona_state.select(any.then_some(0));
    }

    /// Progress note for events that wait on a backend.
    fn pending_note(&self, event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::SendMessage { text } if !text.trim().is_empty() => {
                let name = self
                    .session
                    .selected_persona()
                    .map_or("Counterpart", |p| p.name.as_str());
                Some(format!("{name} is typing..."))
            }
            SessionEvent::EndSession => Some("Analyzing your performance...".into()),
            _ => None,
        }
    }
}

// ── Public entry point ───────────────────────────────────────────

/// Launch the TUI. Blocks until the user quits (q / Esc / Ctrl-C).
pub async fn run_dashboard(coach: Arc<Coach>) -> anyhow::Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, &coach).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    coach: &Coach,
) -> anyhow::Result<()> {
    let catalog = coach.catalog();

    loop {
        draw(terminal, app, catalog)?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.on_key(key, catalog) {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Dispatch(event) => {
                if let Some(note) = app.pending_note(&event) {
                    app.pending = Some(note);
                    draw(terminal, app, catalog)?;
                }
                let result = coach.handle_event(&mut app.session, event).await;
                app.pending = None;
                match result {
                    Ok(()) => {
                        app.status = None;
                        if app.session.screen() == Screen::PersonaList {
                            app.reset_selection(catalog);
                        }
                    }
                    Err(e) => app.status = Some(e.to_string()),
                }
            }
        }
    }
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    catalog: &PersonaCatalog,
) -> anyhow::Result<()> {
    let view = view::project_filtered(&app.session, catalog, app.filter);
    terminal.draw(|f| render(f, app, &view))?;
    Ok(())
}

// ── Rendering ────────────────────────────────────────────────────

fn render(f: &mut Frame, app: &mut App, view: &ScreenView) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Active screen
            Constraint::Length(1), // Footer / key hints
        ])
        .split(size);

    render_header(f, chunks[0], view.screen());
    match view {
        ScreenView::Dashboard(d) => widgets::dashboard::render(f, chunks[1], d, &app.analytics),
        ScreenView::PersonaList(p) => {
            widgets::personas::render(f, chunks[1], p, &mut app.persona_state)
        }
        ScreenView::InConversation(c) => widgets::conversation::render(
            f,
            chunks[1],
            c,
            &app.input,
            app.pending.as_deref(),
        ),
        ScreenView::SessionComplete(r) => widgets::report::render(f, chunks[1], r),
    }
    render_footer(f, chunks[2], app, view.screen());
}

fn render_header(f: &mut Frame, area: Rect, active: Screen) {
    let titles: Vec<Line> = SCREENS
        .iter()
        .map(|(screen, label)| {
            let style = if *screen == active {
                Theme::header()
            } else {
                Theme::text_dim()
            };
            Line::from(Span::styled(format!(" {label} "), style))
        })
        .collect();

    let selected = SCREENS.iter().position(|(s, _)| *s == active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(" HCP Sales Coach ", Theme::header()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .select(selected)
        .highlight_style(Theme::header())
        .divider(Span::styled(" > ", Theme::text_dim()));

    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, screen: Screen) {
    if let Some(status) = &app.status {
        let p = Paragraph::new(Line::from(Span::styled(format!(" {status}"), Theme::error())));
        f.render_widget(p, area);
        return;
    }

    let keys: &[(&str, &str)] = match screen {
        Screen::Dashboard => &[("p/Enter", "start practice"), ("q", "quit")],
        Screen::PersonaList => &[
            ("j/k", "move"),
            ("Enter", "select"),
            ("f", "filter"),
            ("d", "dashboard"),
            ("q", "quit"),
        ],
        Screen::InConversation => &[
            ("Enter", "send"),
            ("Esc", "end session"),
            ("^S", "switch persona"),
            ("^D", "dashboard"),
        ],
        Screen::SessionComplete => &[("n", "new persona"), ("d", "dashboard"), ("q", "quit")],
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(k, d)| {
            [
                Span::styled(format!(" {k}"), Theme::key_hint()),
                Span::styled(format!(" {d} "), Theme::key_desc()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_dashboard_keys() {
        let catalog = PersonaCatalog::builtin();
        let mut app = App::new();
        assert_eq!(
            app.on_key(key(KeyCode::Enter), &catalog),
            Action::Dispatch(SessionEvent::navigate(NavTarget::PersonaList))
        );
        assert_eq!(app.on_key(key(KeyCode::Char('q')), &catalog), Action::Quit);
        assert_eq!(app.on_key(ctrl('c'), &catalog), Action::Quit);
    }

    #[test]
    fn test_filter_cycles_through_tiers() {
        let mut app = App::new();
        let seen: Vec<Option<Difficulty>> = (0..4)
            .map(|_| {
                app.cycle_filter();
                app.filter
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                Some(Difficulty::Easy),
                Some(Difficulty::Medium),
                Some(Difficulty::Hard),
                None
            ]
        );
    }

    #[test]
    fn test_selection_clamps_to_filtered_list() {
        let catalog = PersonaCatalog::builtin();
        let mut app = App::new();
        app.filter = Some(Difficulty::Hard);
        app.reset_selection(&catalog);
        for _ in 0..5 {
            app.move_selection(&catalog, 1);
        }
        assert_eq!(app.persona_state.selected(), Some(1));
        app.move_selection(&catalog, -1);
        app.move_selection(&catalog, -1);
        assert_eq!(app.persona_state.selected(), Some(0));

        app.filter = Some(Difficulty::Easy);
        app.reset_selection(&catalog);
        assert_eq!(app.persona_state.selected(), None);
    }

    #[tokio::test]
    async fn test_conversation_input_and_send() {
        let coach = Coach::new(
            Arc::new(PersonaCatalog::builtin()),
            Arc::new(crate::dialogue::ScriptedResponder::seeded(1)),
            Arc::new(crate::assessment::FixedAssessor),
        );
        let catalog = coach.catalog();
        let mut app = App::new();
        coach
            .handle_event(&mut app.session, SessionEvent::navigate(NavTarget::PersonaList))
            .await
            .unwrap();
        app.reset_selection(catalog);
        let Action::Dispatch(select) = app.on_key(key(KeyCode::Enter), catalog) else {
            panic!("expected a selection");
        };
        assert_eq!(select, SessionEvent::select_persona("Dr. Sarah Chen"));
        coach.handle_event(&mut app.session, select).await.unwrap();

        for c in "hi!".chars() {
            assert_eq!(app.on_key(key(KeyCode::Char(c)), catalog), Action::None);
        }
        app.on_key(key(KeyCode::Backspace), catalog);
        let send = app.on_key(key(KeyCode::Enter), catalog);
        assert_eq!(send, Action::Dispatch(SessionEvent::send_message("hi")));
        assert!(app.input.is_empty());
        assert_eq!(
            app.pending_note(&SessionEvent::send_message("hi")).as_deref(),
            Some("Dr. Sarah Chen is typing...")
        );
        assert_eq!(
            app.on_key(ctrl('s'), catalog),
            Action::Dispatch(SessionEvent::SwitchPersona)
        );
    }
}
