use std::path::PathBuf;

use clap::{Parser, Subcommand};
use evolve_core::config::{API_KEY_ENV, BASE_URL_ENV, MODEL_ENV};

use crate::cli::{
    CardCommands, ChatCommands, EnergyArgs, PlanCommands, StateArgs, TaskCommands,
};

/// Command-line front end for the Evolve coaching engine
///
/// Evolve walks you from an open-ended conversation with a coach to a
/// concrete plan, then tracks the tasks that plan produces. Running `evolve`
/// without a command opens the view that fits where you left off: the
/// dialogue until a plan is accepted, the task list after that.
#[derive(Parser)]
#[command(version, about, name = "evolve")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/evolve/evolve.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// API key for the advisory service. Without one the coach stays offline
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for coach replies
    #[arg(long, global = true, env = MODEL_ENV)]
    pub model: Option<String>,

    /// Base URL of the advisory service
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Accept any card the coach sends, regardless of workshop phase
    #[arg(long, global = true)]
    pub no_phase_gate: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Inspect plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Talk to the coach
    #[command(alias = "c")]
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Answer a card the coach attached to a message
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
    /// Show or set today's energy level
    #[command(alias = "e")]
    Energy(EnergyArgs),
    /// Show or set the lifecycle state
    State(StateArgs),
    /// Show an overview of the current state
    #[command(alias = "st")]
    Status,
}
