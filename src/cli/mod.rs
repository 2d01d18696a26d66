// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;
pub mod personas;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hcpcoach",
    about = "Practice sales conversations with simulated healthcare professionals",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Seed for reproducible counterpart replies
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the simulated reply and analysis delays
    #[arg(long, global = true)]
    pub instant: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI dashboard (default)
    Dashboard,
    /// Line-based practice session in the terminal
    Chat {
        /// Persona to talk to; interactive picker if omitted
        #[arg(short, long)]
        persona: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },
    /// List available personas
    Personas {
        /// Only show one tier: easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
