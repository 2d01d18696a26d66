// src/cli/personas.rs — `hcpcoach personas`

use crate::persona::{Difficulty, PersonaCatalog};
use crate::view;

pub fn run_personas(
    catalog: &PersonaCatalog,
    difficulty: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let filter = match difficulty {
        Some(raw) => Some(
            Difficulty::parse(raw)
                .ok_or_else(|| anyhow::anyhow!("Unknown difficulty '{raw}' (easy, medium, hard)"))?,
        ),
        None => None,
    };

    let cards = view::persona_cards(catalog, filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No personas match.");
        return Ok(());
    }

    println!(
        "{:<22} {:<18} {:<10} {:<8} PERSONALITY",
        "NAME", "SPECIALTY", "EXPERIENCE", "LEVEL"
    );
    for c in &cards {
        println!(
            "{:<22} {:<18} {:<10} {:<8} {}",
            c.name,
            c.specialty,
            c.experience,
            c.difficulty.as_str(),
            c.personality
        );
    }
    Ok(())
}
