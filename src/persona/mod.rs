// src/persona/mod.rs — Practice personas (fictional healthcare professionals)

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::PersonaCatalog;

/// How hard a persona is to win over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Badge color name shown next to the tier.
    pub const fn badge(self) -> &'static str {
        match self {
            Difficulty::Easy => "green",
            Difficulty::Medium => "yellow",
            Difficulty::Hard => "red",
        }
    }

    /// Case-insensitive parse; `None` for anything outside the three tiers.
    pub fn parse(s: &str) -> Option<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fictional counterpart with fixed traits. The name doubles as the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub specialty: String,
    pub experience_years: u8,
    pub personality: String,
    pub context: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub objections: Vec<String>,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

fn default_avatar() -> String {
    "doctor".into()
}

impl Persona {
    pub fn id(&self) -> &str {
        &self.name
    }

    /// Opening line the counterpart seeds every new conversation with.
    pub fn greeting(&self) -> String {
        format!(
            "Good morning, I'm {}. I understand you wanted to speak with me about a new \
             treatment option? I have about 10 minutes before my next patient.",
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" Medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("extreme"), None);
    }

    #[test]
    fn test_difficulty_badges() {
        assert_eq!(Difficulty::Easy.badge(), "green");
        assert_eq!(Difficulty::Medium.badge(), "yellow");
        assert_eq!(Difficulty::Hard.badge(), "red");
    }

    #[test]
    fn test_greeting_mentions_name() {
        let catalog = PersonaCatalog::builtin();
        let persona = catalog.get("Dr. Emily Watson").unwrap();
        assert!(persona.greeting().starts_with("Good morning, I'm Dr. Emily Watson."));
    }
}
