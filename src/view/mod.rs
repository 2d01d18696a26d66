// src/view/mod.rs — Read-side projection of a session into renderable data
//
// `project` never mutates the session and produces a view for every state.

pub mod analytics;

use serde::Serialize;

use crate::assessment::{Assessment, Competency};
use crate::persona::{Difficulty, Persona, PersonaCatalog};
use crate::session::{MessageRole, Screen, Session};

pub use analytics::{analytics, quick_stats, AnalyticsView};

/// Reference point for the report's score delta.
pub const SCORE_BASELINE: u8 = 80;

const COACHING_NOTE: &str = "Great progress on building rapport with skeptical HCPs! \
Your clinical knowledge is a real strength. Focus area: work on preemptively addressing \
common objections before they're raised. Schedule a coaching session to practice advanced \
objection handling techniques. - Sarah Johnson, Sales Manager";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Dashboard(DashboardView),
    PersonaList(PersonaListView),
    InConversation(ConversationView),
    SessionComplete(ReportView),
}

impl ScreenView {
    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::Dashboard(_) => Screen::Dashboard,
            ScreenView::PersonaList(_) => Screen::PersonaList,
            ScreenView::InConversation(_) => Screen::InConversation,
            ScreenView::SessionComplete(_) => Screen::SessionComplete,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub quick_stats: Vec<analytics::StatTile>,
    pub recent_activity: Vec<analytics::ActivityItem>,
    pub learning_path: Vec<analytics::LearningPathCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaCard {
    pub name: String,
    pub specialty: String,
    pub experience: String,
    pub personality: String,
    pub context: String,
    pub objections: Vec<String>,
    pub difficulty: Difficulty,
    pub badge: &'static str,
    pub avatar: String,
}

impl From<&Persona> for PersonaCard {
    fn from(p: &Persona) -> Self {
        Self {
            name: p.name.clone(),
            specialty: p.specialty.clone(),
            experience: format!("{} years", p.experience_years),
            personality: p.personality.clone(),
            context: p.context.clone(),
            objections: p.objections.clone(),
            difficulty: p.difficulty,
            badge: p.difficulty.badge(),
            avatar: p.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaListView {
    /// `None` means all levels.
    pub filter: Option<Difficulty>,
    pub personas: Vec<PersonaCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonaHeader {
    pub name: String,
    pub specialty: String,
    pub difficulty: Difficulty,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub speaker: String,
    pub content: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub persona: Option<PersonaHeader>,
    pub messages: Vec<MessageView>,
    pub exchange_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: Competency,
    pub score: u8,
    pub benchmark: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub persona_name: String,
    pub assessment: Assessment,
    pub baseline: u8,
    pub score_delta: i16,
    pub exchange_count: usize,
    /// Counterpart turns after the opening greeting.
    pub objections_raised: usize,
    /// First to last message, `m:ss`.
    pub duration: String,
    pub categories: Vec<CategoryRow>,
    pub coaching_note: &'static str,
}

/// Project the active screen of `session`.
pub fn project(session: &Session, catalog: &PersonaCatalog) -> ScreenView {
    project_filtered(session, catalog, None)
}

/// Like [`project`], with a difficulty filter applied to the persona list.
pub fn project_filtered(
    session: &Session,
    catalog: &PersonaCatalog,
    filter: Option<Difficulty>,
) -> ScreenView {
    match session.screen() {
        Screen::Dashboard => ScreenView::Dashboard(dashboard()),
        Screen::PersonaList => ScreenView::PersonaList(persona_list(catalog, filter)),
        Screen::InConversation => ScreenView::InConversation(conversation(session)),
        Screen::SessionComplete => match report(session) {
            Some(view) => ScreenView::SessionComplete(view),
            // Unreachable while the machine holds its invariants.
            None => ScreenView::PersonaList(persona_list(catalog, filter)),
        },
    }
}

pub fn dashboard() -> DashboardView {
    DashboardView {
        quick_stats: analytics::quick_stats(),
        recent_activity: analytics::recent_activity(),
        learning_path: analytics::learning_path(),
    }
}

/// Persona cards in catalog order, optionally limited to one tier.
pub fn persona_cards(catalog: &PersonaCatalog, filter: Option<Difficulty>) -> Vec<PersonaCard> {
    catalog
        .filter(filter)
        .into_iter()
        .map(PersonaCard::from)
        .collect()
}

pub fn persona_list(catalog: &PersonaCatalog, filter: Option<Difficulty>) -> PersonaListView {
    PersonaListView {
        filter,
        personas: persona_cards(catalog, filter),
    }
}

pub fn conversation(session: &Session) -> ConversationView {
    let persona = session.selected_persona();
    let counterpart_name = persona.map_or("Counterpart", |p| p.name.as_str());

    let messages = session
        .transcript()
        .iter()
        .map(|m| MessageView {
            role: m.role,
            speaker: match m.role {
                MessageRole::User => "You".to_string(),
                MessageRole::Counterpart => counterpart_name.to_string(),
            },
            content: m.content.clone(),
            time: m
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string(),
        })
        .collect();

    ConversationView {
        persona: persona.map(|p| PersonaHeader {
            name: p.name.clone(),
            specialty: p.specialty.clone(),
            difficulty: p.difficulty,
            avatar: p.avatar.clone(),
        }),
        messages,
        exchange_count: session.exchange_count(),
    }
}

/// Report for a completed session; `None` when no assessment is present.
pub fn report(session: &Session) -> Option<ReportView> {
    let assessment = session.assessment()?.clone();
    let transcript = session.transcript();

    let objections_raised = transcript
        .iter()
        .skip(1)
        .filter(|m| m.role == MessageRole::Counterpart)
        .count();

    let categories = Competency::ALL
        .iter()
        .map(|&c| CategoryRow {
            category: c,
            score: assessment.score(c),
            benchmark: c.benchmark(),
        })
        .collect();

    Some(ReportView {
        persona_name: session
            .selected_persona()
            .map(|p| p.name.clone())
            .unwrap_or_default(),
        baseline: SCORE_BASELINE,
        score_delta: i16::from(assessment.overall_score) - i16::from(SCORE_BASELINE),
        exchange_count: session.exchange_count(),
        objections_raised,
        duration: format_duration(transcript),
        categories,
        coaching_note: COACHING_NOTE,
        assessment,
    })
}

fn format_duration(transcript: &[crate::session::ChatMessage]) -> String {
    let secs = match (transcript.first(), transcript.last()) {
        (Some(first), Some(last)) => (last.timestamp - first.timestamp).num_seconds().max(0),
        _ => 0,
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChatMessage;
    use chrono::Duration;

    #[test]
    fn test_dashboard_projection() {
        let s = Session::new();
        let view = project(&s, &PersonaCatalog::builtin());
        assert_eq!(view.screen(), Screen::Dashboard);
        match view {
            ScreenView::Dashboard(d) => assert_eq!(d.quick_stats.len(), 4),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_persona_cards_filtered() {
        let catalog = PersonaCatalog::builtin();
        let hard = persona_cards(&catalog, Some(Difficulty::Hard));
        assert_eq!(hard.len(), 2);
        assert!(hard.iter().all(|c| c.badge == "red"));
        let all = persona_cards(&catalog, None);
        assert_eq!(all[1].experience, "8 years");
    }

    #[test]
    fn test_format_duration() {
        let start = ChatMessage::counterpart("hi");
        let mut end = ChatMessage::user("bye");
        end.timestamp = start.timestamp + Duration::seconds(504);
        assert_eq!(format_duration(&[start, end]), "8:24");
        assert_eq!(format_duration(&[]), "0:00");
    }

    #[test]
    fn test_view_json_tagged_by_screen() {
        let json = serde_json::to_value(project(&Session::new(), &PersonaCatalog::builtin()))
            .unwrap();
        assert_eq!(json["screen"], "dashboard");
    }
}
