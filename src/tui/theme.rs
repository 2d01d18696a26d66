// src/tui/theme.rs — Color scheme and style definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::assessment::{Priority, STRONG_FROM, WEAK_BELOW};
use crate::persona::Difficulty;

/// Clinical teal palette.
pub struct Theme;

impl Theme {
    // ── Brand colors ─────────────────────────────────────────────
    pub const TEAL: Color = Color::Rgb(0, 150, 150);
    pub const WHITE: Color = Color::Rgb(240, 240, 240);
    pub const BLUE: Color = Color::Rgb(70, 130, 220);
    pub const GREEN: Color = Color::Rgb(80, 200, 120);
    pub const RED: Color = Color::Rgb(230, 80, 80);
    pub const YELLOW: Color = Color::Rgb(230, 200, 60);
    pub const GRAY: Color = Color::Rgb(120, 120, 140);
    pub const DIM: Color = Color::Rgb(80, 80, 100);

    // ── Semantic styles ──────────────────────────────────────────

    /// Main title / header bar.
    pub fn header() -> Style {
        Style::default().fg(Theme::TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::DIM)
    }

    /// Border of the panel that takes keyboard input.
    pub fn border_focus() -> Style {
        Style::default().fg(Theme::TEAL)
    }

    pub fn text() -> Style {
        Style::default().fg(Theme::WHITE)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Theme::GRAY)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::GREEN)
    }

    pub fn warning() -> Style {
        Style::default().fg(Theme::YELLOW)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::RED)
    }

    pub fn info() -> Style {
        Style::default().fg(Theme::BLUE)
    }

    /// Speaker label for the rep's own turns.
    pub fn speaker_user() -> Style {
        Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD)
    }

    /// Speaker label for the counterpart's turns.
    pub fn speaker_counterpart() -> Style {
        Style::default().fg(Theme::TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::TEAL)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn table_selected() -> Style {
        Style::default().bg(Color::Rgb(30, 50, 60)).fg(Theme::WHITE)
    }

    /// Key hint in the footer.
    pub fn key_hint() -> Style {
        Style::default().fg(Theme::TEAL)
    }

    /// Description next to key hint.
    pub fn key_desc() -> Style {
        Style::default().fg(Theme::GRAY)
    }

    /// Badge color for a difficulty tier.
    pub fn difficulty(d: Difficulty) -> Style {
        match d {
            Difficulty::Easy => Theme::success(),
            Difficulty::Medium => Theme::warning(),
            Difficulty::Hard => Theme::error(),
        }
    }

    pub fn priority(p: Priority) -> Style {
        match p {
            Priority::High => Theme::error(),
            Priority::Medium => Theme::warning(),
            Priority::Low => Theme::success(),
        }
    }

    /// Style for a 0–100 score, split at the weak/strong thresholds.
    pub fn score(value: u8) -> Style {
        if value >= STRONG_FROM {
            Style::default().fg(Theme::GREEN)
        } else if value >= WEAK_BELOW {
            Style::default().fg(Theme::YELLOW)
        } else {
            Style::default().fg(Theme::RED)
        }
    }
}
