// src/session/mod.rs — Session state and the events that drive it
//
// A `Session` is owned by whoever drives it (TUI, REPL, one API client) and
// only changes through `Coach::handle_event`. Nothing here is persisted.

pub mod machine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::assessment::Assessment;
use crate::persona::Persona;

pub use machine::Coach;

/// The screens of the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    PersonaList,
    InConversation,
    SessionComplete,
}

impl Screen {
    pub const fn as_str(self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::PersonaList => "persona_list",
            Screen::InConversation => "in_conversation",
            Screen::SessionComplete => "session_complete",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screens reachable through `navigate` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    Dashboard,
    PersonaList,
}

impl NavTarget {
    pub const fn screen(self) -> Screen {
        match self {
            NavTarget::Dashboard => Screen::Dashboard,
            NavTarget::PersonaList => Screen::PersonaList,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Counterpart,
}

/// One turn of a transcript. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn counterpart(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Counterpart,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Events accepted by the session machine. JSON form is tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Navigate { target: NavTarget },
    SelectPersona { id: String },
    SwitchPersona,
    SendMessage { text: String },
    EndSession,
    RestartWithNewPersona,
    ReturnToDashboard,
}

impl SessionEvent {
    pub fn navigate(target: NavTarget) -> Self {
        SessionEvent::Navigate { target }
    }

    pub fn select_persona(id: impl Into<String>) -> Self {
        SessionEvent::SelectPersona { id: id.into() }
    }

    pub fn send_message(text: impl Into<String>) -> Self {
        SessionEvent::SendMessage { text: text.into() }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SessionEvent::Navigate { .. } => "navigate",
            SessionEvent::SelectPersona { .. } => "select_persona",
            SessionEvent::SwitchPersona => "switch_persona",
            SessionEvent::SendMessage { .. } => "send_message",
            SessionEvent::EndSession => "end_session",
            SessionEvent::RestartWithNewPersona => "restart_with_new_persona",
            SessionEvent::ReturnToDashboard => "return_to_dashboard",
        }
    }
}

/// Mutable interaction state for one user.
///
/// Invariants kept by the machine:
/// - the transcript is non-empty on `InConversation` and `SessionComplete`
/// - an assessment exists exactly when the screen is `SessionComplete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    id: Uuid,
    screen: Screen,
    selected_persona: Option<Persona>,
    transcript: Vec<ChatMessage>,
    assessment: Option<Assessment>,
    created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            screen: Screen::Dashboard,
            selected_persona: None,
            transcript: Vec::new(),
            assessment: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_persona(&self) -> Option<&Persona> {
        self.selected_persona.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of messages the user has sent in the current conversation.
    pub fn exchange_count(&self) -> usize {
        self.transcript.iter().filter(|m| m.is_user()).count()
    }

    // ── Mutations (driven by `machine`) ──────────────────────────

    fn reset(&mut self, screen: Screen) {
        self.screen = screen;
        self.selected_persona = None;
        self.transcript.clear();
        self.assessment = None;
    }

    fn begin_conversation(&mut self, persona: Persona) {
        let greeting = ChatMessage::counterpart(persona.greeting());
        self.screen = Screen::InConversation;
        self.selected_persona = Some(persona);
        self.transcript = vec![greeting];
        self.assessment = None;
    }

    fn push_exchange(&mut self, user: ChatMessage, reply: ChatMessage) {
        self.transcript.push(user);
        self.transcript.push(reply);
    }

    fn complete(&mut self, assessment: Assessment) {
        self.screen = Screen::SessionComplete;
        self.assessment = Some(assessment);
    }
}
