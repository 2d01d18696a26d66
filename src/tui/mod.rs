// src/tui/mod.rs — Terminal front end.
//
// Full-screen dashboard, persona picker, conversation and report, built with
// ratatui. Launch via `hcpcoach dashboard` (the default command).

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::run_dashboard;
