// src/main.rs — hcpcoach entry point

use clap::Parser;
use std::sync::Arc;

use hcpcoach::api::{self, ApiState};
use hcpcoach::cli::{Cli, Commands};
use hcpcoach::infra::config::Config;
use hcpcoach::infra::logger;
use hcpcoach::persona::PersonaCatalog;
use hcpcoach::session::Coach;

#[tokio::main]
async fn main() {
    // Initialize logging (respects HCPCOACH_LOG / RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    if cli.instant {
        config.simulation.reply_delay_ms = 0;
        config.simulation.assessment_delay_ms = 0;
    }

    let catalog = PersonaCatalog::from_config(&config.catalog)?;
    tracing::debug!("Loaded {} personas", catalog.len());

    // Listing needs no session machinery
    if let Some(Commands::Personas { difficulty, json }) = &cli.command {
        return hcpcoach::cli::personas::run_personas(&catalog, difficulty.as_deref(), *json);
    }

    let coach = Arc::new(Coach::from_config(&config, catalog));

    match cli.command {
        None | Some(Commands::Dashboard) => hcpcoach::tui::run_dashboard(coach).await,
        Some(Commands::Chat { persona }) => hcpcoach::cli::chat::run_chat(coach, persona).await,
        Some(Commands::Serve { port, host }) => {
            let mut api_config = config.api.clone();
            if let Some(port) = port {
                api_config.port = port;
            }
            if let Some(host) = host {
                api_config.host = host;
            }
            let state = ApiState::from_config(coach, &api_config);
            api::start_server(&api_config, state).await
        }
        Some(Commands::Personas { .. }) => Ok(()),
    }
}
