//! Evolve CLI
//!
//! Terminal front end for the Evolve coaching engine.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use evolve_core::{AdvisoryConfig, EngineBuilder, EngineConfig};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        api_key,
        model,
        base_url,
        no_phase_gate,
        command,
    } = Args::parse();

    let advisory = AdvisoryConfig::default()
        .with_api_key(api_key)
        .with_model(model)
        .with_base_url(base_url);

    let engine = EngineBuilder::new()
        .with_database_path(database_file)
        .with_advisory_config(advisory)
        .with_config(EngineConfig {
            enforce_phase_gate: !no_phase_gate,
        })
        .build()
        .await
        .context("Failed to initialize engine")?;

    info!("Evolve started");

    let mut cli = Cli::new(engine, TerminalRenderer::new(!no_color));
    match command {
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Chat { command }) => cli.handle_chat_command(command).await,
        Some(Card { command }) => cli.handle_card_command(command).await,
        Some(Energy(args)) => cli.handle_energy_command(args).await,
        Some(State(args)) => cli.handle_state_command(args).await,
        Some(Status) => cli.show_status(),
        None => cli.show_initial_view(),
    }
}
