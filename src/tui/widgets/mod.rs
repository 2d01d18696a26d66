// src/tui/widgets/mod.rs — One panel per screen.

pub mod conversation;
pub mod dashboard;
pub mod personas;
pub mod report;
