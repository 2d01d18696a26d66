// src/persona/catalog.rs — Read-only persona registry
//
// Built-in personas come first, in declaration order. Extra personas can be
// appended from a TOML file of `[[persona]]` tables without touching callers.

use serde::Deserialize;
use std::path::Path;

use super::{Difficulty, Persona};
use crate::infra::config::CatalogConfig;
use crate::infra::errors::CoachError;
use crate::infra::paths;

#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

/// On-disk layout of a personas file.
#[derive(Debug, Deserialize)]
struct PersonaFile {
    #[serde(default)]
    persona: Vec<Persona>,
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PersonaCatalog {
    /// The three reference personas.
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                builtin_persona(
                    "Dr. Sarah Chen",
                    "Cardiologist",
                    15,
                    "Data-driven, skeptical of new treatments",
                    "Busy practice, values efficiency",
                    Difficulty::Hard,
                    &[
                        "Need more clinical data",
                        "Current treatment works fine",
                        "Cost concerns",
                    ],
                    "female-doctor",
                ),
                builtin_persona(
                    "Dr. Michael Roberts",
                    "General Practitioner",
                    8,
                    "Open to innovation, patient-focused",
                    "Growing practice, interested in new solutions",
                    Difficulty::Medium,
                    &[
                        "Patient acceptance",
                        "Insurance coverage",
                        "Training requirements",
                    ],
                    "male-doctor",
                ),
                builtin_persona(
                    "Dr. Emily Watson",
                    "Oncologist",
                    20,
                    "Conservative, evidence-based",
                    "Academic hospital setting",
                    Difficulty::Hard,
                    &[
                        "Peer-reviewed studies needed",
                        "Hospital formulary process",
                        "Side effect profile",
                    ],
                    "female-doctor",
                ),
            ],
        }
    }

    /// Create an empty catalog (for testing).
    pub fn empty() -> Self {
        Self {
            personas: Vec::new(),
        }
    }

    /// Parse a personas file body into a standalone catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, CoachError> {
        let file: PersonaFile = toml::from_str(content)
            .map_err(|e| CoachError::Config(format!("invalid personas file: {e}")))?;
        let mut catalog = Self::empty();
        for persona in file.persona {
            catalog.push(persona)?;
        }
        Ok(catalog)
    }

    /// Built-in personas followed by the ones defined in `path`.
    pub fn load(path: &Path) -> Result<Self, CoachError> {
        let content = std::fs::read_to_string(path)?;
        let extra = Self::from_toml_str(&content)?;
        let mut catalog = Self::builtin();
        catalog.extend(extra)?;
        tracing::debug!(
            "Loaded {} persona(s) from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Catalog for a run: the configured personas file if set, else
    /// `personas.toml` in the config dir when present, else built-ins only.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CoachError> {
        if let Some(ref file) = config.personas_file {
            return Self::load(Path::new(file));
        }
        let default_path = paths::personas_file_path();
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            Ok(Self::builtin())
        }
    }

    /// Append every persona from `other`. On a duplicate id nothing is added.
    pub fn extend(&mut self, other: PersonaCatalog) -> Result<(), CoachError> {
        let mut merged = self.clone();
        for persona in other.personas {
            merged.push(persona)?;
        }
        *self = merged;
        Ok(())
    }

    fn push(&mut self, persona: Persona) -> Result<(), CoachError> {
        if persona.name.trim().is_empty() {
            return Err(CoachError::Config("persona name cannot be empty".into()));
        }
        if persona.specialty.trim().is_empty() {
            return Err(CoachError::Config(format!(
                "persona '{}' has no specialty",
                persona.name
            )));
        }
        if self.contains(&persona.name) {
            return Err(CoachError::Config(format!(
                "duplicate persona '{}'",
                persona.name
            )));
        }
        self.personas.push(persona);
        Ok(())
    }

    /// All personas in declaration order.
    pub fn list(&self) -> &[Persona] {
        &self.personas
    }

    pub fn get(&self, id: &str) -> Result<&Persona, CoachError> {
        self.personas
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| CoachError::persona_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.personas.iter().any(|p| p.id() == id)
    }

    /// Personas of one tier, or all of them when `difficulty` is `None`.
    pub fn filter(&self, difficulty: Option<Difficulty>) -> Vec<&Persona> {
        self.personas
            .iter()
            .filter(|p| difficulty.map_or(true, |d| p.difficulty == d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn builtin_persona(
    name: &str,
    specialty: &str,
    experience_years: u8,
    personality: &str,
    context: &str,
    difficulty: Difficulty,
    objections: &[&str],
    avatar: &str,
) -> Persona {
    Persona {
        name: name.into(),
        specialty: specialty.into(),
        experience_years,
        personality: personality.into(),
        context: context.into(),
        difficulty,
        objections: objections.iter().map(|o| o.to_string()).collect(),
        avatar: avatar.into(),
    }
}
