// src/assessment/fixed.rs — Constant reference report
//
// Transcript and persona are accepted but not inspected yet: every session
// gets the same scores, insights and recommendations.

use async_trait::async_trait;

use super::{Assessment, Assessor, Competency, LearningModule, PracticeScenario, Priority};
use crate::infra::errors::CoachError;
use crate::persona::{Difficulty, Persona};
use crate::session::ChatMessage;

const REFERENCE_SCORES: [(Competency, u8); 5] = [
    (Competency::ClinicalKnowledge, 87),
    (Competency::RapportBuilding, 92),
    (Competency::ObjectionHandling, 78),
    (Competency::ValueCommunication, 85),
    (Competency::ComplianceEthics, 95),
];

/// Build the reference report. Never fails, whatever the transcript holds.
pub fn generate_assessment(_transcript: &[ChatMessage], _persona: &Persona) -> Assessment {
    Assessment::from_scores(REFERENCE_SCORES, insights(), modules(), scenarios())
}

fn insights() -> Vec<String> {
    vec![
        "Established trust quickly with appropriate empathy; rapport building is a clear strength.".into(),
        "Clinical trial data was referenced accurately and ethical boundaries held throughout.".into(),
        "Objections were handled late; address common concerns before the physician raises them.".into(),
    ]
}

fn modules() -> Vec<LearningModule> {
    vec![
        LearningModule {
            title: "Advanced Objection Handling".into(),
            kind: "Interactive Workshop".into(),
            duration: "45 min".into(),
            priority: Priority::High,
            description: "Practice anticipating and reframing clinical, cost and switching objections.".into(),
            link: "/learning/objection-handling".into(),
        },
        LearningModule {
            title: "Communicating Economic Value".into(),
            kind: "Video Course".into(),
            duration: "30 min".into(),
            priority: Priority::Medium,
            description: "Strengthen economic and patient-outcome messaging for value discussions.".into(),
            link: "/learning/value-communication".into(),
        },
    ]
}

fn scenarios() -> Vec<PracticeScenario> {
    vec![
        PracticeScenario {
            title: "Skeptical Specialist: Clinical Data Deep-Dive".into(),
            difficulty: Difficulty::Hard,
            description: "Defend Phase III results against a data-driven cardiologist who is happy with the current protocol.".into(),
            personas: vec!["Dr. Sarah Chen".into()],
            duration: "15 min".into(),
            skills: vec!["Objection Handling".into(), "Clinical Knowledge".into()],
        },
        PracticeScenario {
            title: "Formulary Committee Preparation".into(),
            difficulty: Difficulty::Hard,
            description: "Walk an academic oncologist through peer-reviewed evidence and the hospital formulary process.".into(),
            personas: vec!["Dr. Emily Watson".into()],
            duration: "20 min".into(),
            skills: vec!["Value Communication".into(), "Objection Handling".into()],
        },
    ]
}

/// `Assessor` that always returns the reference report.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedAssessor;

#[async_trait]
impl Assessor for FixedAssessor {
    fn id(&self) -> &str {
        "fixed"
    }

    async fn assess(
        &self,
        transcript: &[ChatMessage],
        persona: &Persona,
    ) -> Result<Assessment, CoachError> {
        Ok(generate_assessment(transcript, persona))
    }
}
