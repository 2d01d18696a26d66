// src/session/machine.rs — Session transitions
//
// One event is processed at a time, to completion. All fallible work
// (lookups, backend calls) happens before the session is touched, so a
// rejected event leaves it exactly as it was.

use std::sync::Arc;
use std::time::Duration;

use super::{ChatMessage, Screen, Session, SessionEvent};
use crate::assessment::{Assessor, FixedAssessor};
use crate::dialogue::guard::bounded;
use crate::dialogue::{ReplyRequest, Responder, ScriptedResponder};
use crate::infra::config::Config;
use crate::infra::errors::CoachError;
use crate::persona::PersonaCatalog;

const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives sessions: owns the catalog and the reply/assessment strategies.
/// Holds no per-session state, so one `Coach` can serve many sessions.
pub struct Coach {
    catalog: Arc<PersonaCatalog>,
    responder: Arc<dyn Responder>,
    assessor: Arc<dyn Assessor>,
    reply_delay: Duration,
    assessment_delay: Duration,
    backend_timeout: Duration,
    reject_empty_messages: bool,
}

impl Coach {
    /// A coach with no artificial delays.
    pub fn new(
        catalog: Arc<PersonaCatalog>,
        responder: Arc<dyn Responder>,
        assessor: Arc<dyn Assessor>,
    ) -> Self {
        Self {
            catalog,
            responder,
            assessor,
            reply_delay: Duration::ZERO,
            assessment_delay: Duration::ZERO,
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            reject_empty_messages: false,
        }
    }

    /// Scripted replies and the fixed report, paced and seeded per config.
    pub fn from_config(config: &Config, catalog: PersonaCatalog) -> Self {
        let sim = &config.simulation;
        Self::new(
            Arc::new(catalog),
            Arc::new(ScriptedResponder::new(sim.seed)),
            Arc::new(FixedAssessor),
        )
        .with_delays(sim.reply_delay(), sim.assessment_delay())
        .with_backend_timeout(sim.backend_timeout())
        .with_reject_empty_messages(config.session.reject_empty_messages)
    }

    pub fn with_delays(mut self, reply: Duration, assessment: Duration) -> Self {
        self.reply_delay = reply;
        self.assessment_delay = assessment;
        self
    }

    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout;
        self
    }

    pub fn with_reject_empty_messages(mut self, reject: bool) -> Self {
        self.reject_empty_messages = reject;
        self
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Apply one event to `session`.
    pub async fn handle_event(
        &self,
        session: &mut Session,
        event: SessionEvent,
    ) -> Result<(), CoachError> {
        let from = session.screen();
        let name = event.name();

        let result = match event {
            SessionEvent::Navigate { target } => {
                session.reset(target.screen());
                Ok(())
            }
            SessionEvent::SelectPersona { id } => self.select_persona(session, &id),
            SessionEvent::SwitchPersona => {
                require(session, Screen::InConversation, name).map(|()| {
                    session.reset(Screen::PersonaList);
                })
            }
            SessionEvent::SendMessage { text } => self.send_message(session, &text).await,
            SessionEvent::EndSession => self.end_session(session).await,
            SessionEvent::RestartWithNewPersona => {
                require(session, Screen::SessionComplete, name).map(|()| {
                    session.reset(Screen::PersonaList);
                })
            }
            SessionEvent::ReturnToDashboard => {
                require(session, Screen::SessionComplete, name).map(|()| {
                    session.reset(Screen::Dashboard);
                })
            }
        };

        match &result {
            Ok(()) => tracing::debug!(
                session = %session.id(),
                event = name,
                from = %from,
                to = %session.screen(),
                "transition"
            ),
            Err(e) => tracing::debug!(
                session = %session.id(),
                event = name,
                screen = %from,
                "event rejected: {e}"
            ),
        }
        result
    }

    fn select_persona(&self, session: &mut Session, id: &str) -> Result<(), CoachError> {
        require(session, Screen::PersonaList, "select_persona")?;
        let persona = self.catalog.get(id)?.clone();
        session.begin_conversation(persona);
        Ok(())
    }

    async fn send_message(&self, session: &mut Session, text: &str) -> Result<(), CoachError> {
        require(session, Screen::InConversation, "send_message")?;
        if text.trim().is_empty() {
            return if self.reject_empty_messages {
                Err(CoachError::EmptyInput)
            } else {
                Ok(())
            };
        }

        let persona = session
            .selected_persona()
            .ok_or_else(|| invalid("send_message", session.screen()))?;
        let user = ChatMessage::user(text);

        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }

        let request = ReplyRequest {
            persona,
            transcript: session.transcript(),
            utterance: text,
        };
        let reply = bounded(
            self.responder.id(),
            self.backend_timeout,
            self.responder.reply(request),
        )
        .await
        .inspect_err(|e| tracing::warn!("Reply backend failed: {e}"))?;

        session.push_exchange(user, ChatMessage::counterpart(reply));
        Ok(())
    }

    async fn end_session(&self, session: &mut Session) -> Result<(), CoachError> {
        require(session, Screen::InConversation, "end_session")?;
        let persona = session
            .selected_persona()
            .ok_or_else(|| invalid("end_session", session.screen()))?;

        if !self.assessment_delay.is_zero() {
            tokio::time::sleep(self.assessment_delay).await;
        }

        let assessment = bounded(
            self.assessor.id(),
            self.backend_timeout,
            self.assessor.assess(session.transcript(), persona),
        )
        .await
        .inspect_err(|e| tracing::warn!("Assessment backend failed: {e}"))?;

        session.complete(assessment);
        Ok(())
    }
}

fn require(session: &Session, expected: Screen, event: &str) -> Result<(), CoachError> {
    if session.screen() == expected {
        Ok(())
    } else {
        Err(invalid(event, session.screen()))
    }
}

fn invalid(event: &str, screen: Screen) -> CoachError {
    CoachError::InvalidEvent {
        event: event.to_string(),
        screen: screen.to_string(),
    }
}
