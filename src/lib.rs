// src/lib.rs — Library root for hcpcoach

pub mod api;
pub mod assessment;
pub mod cli;
pub mod dialogue;
pub mod infra;
pub mod persona;
pub mod session;
pub mod tui;
pub mod view;
