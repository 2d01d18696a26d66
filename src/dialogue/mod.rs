// src/dialogue/mod.rs — Counterpart reply backends

pub mod guard;
pub mod scripted;

use async_trait::async_trait;

use crate::infra::errors::CoachError;
use crate::persona::Persona;
use crate::session::ChatMessage;

pub use guard::bounded;
pub use scripted::{select_response, ScriptedResponder, CANDIDATE_REPLIES};

/// Everything a backend may look at when producing the next counterpart turn.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    pub persona: &'a Persona,
    /// Transcript before the user's latest message.
    pub transcript: &'a [ChatMessage],
    pub utterance: &'a str,
}

/// Strategy that produces counterpart replies. The session machine only sees
/// this trait, so a model-backed implementation can replace the scripted one.
#[async_trait]
pub trait Responder: Send + Sync {
    fn id(&self) -> &str;

    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, CoachError>;
}
