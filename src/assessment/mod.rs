// src/assessment/mod.rs — End-of-session performance reports

pub mod fixed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::infra::errors::CoachError;
use crate::persona::{Difficulty, Persona};
use crate::session::ChatMessage;

pub use fixed::{generate_assessment, FixedAssessor};

/// Scores below this mark a weak area.
pub const WEAK_BELOW: u8 = 80;
/// Scores at or above this mark a strong area.
pub const STRONG_FROM: u8 = 90;

/// The five scored competencies, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Competency {
    #[serde(rename = "Clinical Knowledge")]
    ClinicalKnowledge,
    #[serde(rename = "Rapport Building")]
    RapportBuilding,
    #[serde(rename = "Objection Handling")]
    ObjectionHandling,
    #[serde(rename = "Value Communication")]
    ValueCommunication,
    #[serde(rename = "Compliance & Ethics")]
    ComplianceEthics,
}

impl Competency {
    pub const ALL: [Competency; 5] = [
        Competency::ClinicalKnowledge,
        Competency::RapportBuilding,
        Competency::ObjectionHandling,
        Competency::ValueCommunication,
        Competency::ComplianceEthics,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Competency::ClinicalKnowledge => "Clinical Knowledge",
            Competency::RapportBuilding => "Rapport Building",
            Competency::ObjectionHandling => "Objection Handling",
            Competency::ValueCommunication => "Value Communication",
            Competency::ComplianceEthics => "Compliance & Ethics",
        }
    }

    /// Abbreviation used on the competency radar.
    pub const fn short(self) -> &'static str {
        match self {
            Competency::ClinicalKnowledge => "Clinical",
            Competency::RapportBuilding => "Rapport",
            Competency::ObjectionHandling => "Objections",
            Competency::ValueCommunication => "Value",
            Competency::ComplianceEthics => "Compliance",
        }
    }

    /// Team benchmark shown next to the rep's own score.
    pub const fn benchmark(self) -> u8 {
        match self {
            Competency::ClinicalKnowledge => 85,
            Competency::RapportBuilding => 80,
            Competency::ObjectionHandling => 85,
            Competency::ValueCommunication => 80,
            Competency::ComplianceEthics => 90,
        }
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn from_overall(score: u8) -> Self {
        match score {
            0..=69 => SkillLevel::Beginner,
            70..=89 => SkillLevel::Intermediate,
            _ => SkillLevel::Advanced,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningModule {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
    pub priority: Priority,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeScenario {
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub personas: Vec<String>,
    pub duration: String,
    pub skills: Vec<String>,
}

/// A generated performance report. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub overall_score: u8,
    pub scores: BTreeMap<Competency, u8>,
    pub weak_areas: BTreeSet<Competency>,
    pub strong_areas: BTreeSet<Competency>,
    pub insights: Vec<String>,
    pub modules: Vec<LearningModule>,
    pub scenarios: Vec<PracticeScenario>,
    pub skill_level: SkillLevel,
}

impl Assessment {
    /// Derive overall score, weak/strong areas and skill level from
    /// per-category scores. Missing categories count as 0; values clamp to 100.
    pub fn from_scores(
        scores: impl IntoIterator<Item = (Competency, u8)>,
        insights: Vec<String>,
        modules: Vec<LearningModule>,
        scenarios: Vec<PracticeScenario>,
    ) -> Self {
        let mut all: BTreeMap<Competency, u8> = Competency::ALL.iter().map(|&c| (c, 0)).collect();
        for (c, s) in scores {
            all.insert(c, s.min(100));
        }

        let sum: u32 = all.values().map(|&s| u32::from(s)).sum();
        let overall = ((sum as f64) / (all.len() as f64)).round() as u8;

        let weak_areas = all
            .iter()
            .filter(|(_, s)| **s < WEAK_BELOW)
            .map(|(&c, _)| c)
            .collect();
        let strong_areas = all
            .iter()
            .filter(|(_, s)| **s >= STRONG_FROM)
            .map(|(&c, _)| c)
            .collect();

        Self {
            overall_score: overall,
            scores: all,
            weak_areas,
            strong_areas,
            insights,
            modules,
            scenarios,
            skill_level: SkillLevel::from_overall(overall),
        }
    }

    pub fn score(&self, competency: Competency) -> u8 {
        self.scores.get(&competency).copied().unwrap_or(0)
    }
}

/// Strategy that turns a finished conversation into a report. A future
/// implementation can score from transcript features without touching callers.
#[async_trait]
pub trait Assessor: Send + Sync {
    fn id(&self) -> &str;

    async fn assess(
        &self,
        transcript: &[ChatMessage],
        persona: &Persona,
    ) -> Result<Assessment, CoachError>;
}
