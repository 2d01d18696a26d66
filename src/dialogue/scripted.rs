// src/dialogue/scripted.rs — Random pick from a fixed set of clinical objections
//
// Neither the persona nor the utterance changes the outcome. Repeats across
// consecutive turns are allowed.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ReplyRequest, Responder};
use crate::infra::errors::CoachError;

pub const CANDIDATE_REPLIES: [&str; 8] = [
    "I appreciate the information, but I'd need to see more robust clinical trial data before considering this for my patients. What Phase III results do you have?",
    "That's interesting. How does this compare to the current standard of care in terms of efficacy and safety profile?",
    "I'm concerned about the cost. Many of my patients struggle with medication affordability. What patient assistance programs are available?",
    "Can you walk me through the mechanism of action? I want to understand how this differs from existing treatments.",
    "What's the evidence on long-term outcomes? I'm particularly interested in real-world data beyond the clinical trials.",
    "I've had good results with the current treatment protocol. What would be the compelling reason for me to switch?",
    "How does this fit into the current treatment guidelines? Has it been incorporated into any professional society recommendations?",
    "What kind of monitoring is required? I need to understand the practical implications for my practice.",
];

/// Pick one candidate reply uniformly at random using the caller's RNG.
pub fn select_response<R: Rng + ?Sized>(
    rng: &mut R,
    _persona_id: &str,
    _utterance: &str,
) -> &'static str {
    CANDIDATE_REPLIES[rng.gen_range(0..CANDIDATE_REPLIES.len())]
}

/// `Responder` backed by [`select_response`] and an owned, seedable RNG.
pub struct ScriptedResponder {
    rng: Mutex<StdRng>,
}

impl ScriptedResponder {
    /// Seeded responders replay the same sequence of picks.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn reply(&self, request: ReplyRequest<'_>) -> Result<String, CoachError> {
        let text = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            select_response(&mut *rng, request.persona.id(), request.utterance)
        };
        Ok(text.to_string())
    }
}
