//! # aura
//!
//! Command-line driver for the Aura personal assistant core.
//!
//! Every subcommand runs one slice of the orchestration layer against the
//! mock backend:
//! - `aura dashboard` — concurrent load of suggestions, goals, insight, schedule
//! - `aura chat <prompt>` — stream the agent's reply
//! - `aura goal add/list` — goal decomposition pipeline
//! - `aura automation list/toggle` — automation board
//! - `aura integration list/connect/disconnect` — stored API keys
//! - `aura finance`, `aura wellness`, `aura relationships` — single views
//! - `aura session status/onboard/logout` — session flags

mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Aura — your AI life OS, on the command line.
#[derive(Parser)]
#[command(name = "aura", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Skip simulated backend latency.
    #[arg(long)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dashboard.
    Dashboard {
        /// Fail as a whole if any section fails.
        #[arg(long)]
        strict: bool,
        /// Act on the suggestion at this position (1-based).
        #[arg(long)]
        accept: Option<usize>,
        /// Print the view as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Ask the agent something.
    Chat {
        /// The prompt to send.
        prompt: String,
    },
    /// Manage goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Inspect and toggle automations.
    Automation {
        #[command(subcommand)]
        command: commands::automation::AutomationCommands,
    },
    /// Manage connected services.
    Integration {
        #[command(subcommand)]
        command: commands::integration::IntegrationCommands,
    },
    /// Show the financial snapshot.
    Finance {
        /// Ask to be connected with a financial advisor.
        #[arg(long)]
        advisor: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show wellness metrics and the agent's insight.
    Wellness {
        #[arg(long)]
        json: bool,
    },
    /// Show contacts worth reaching out to.
    Relationships {
        /// Act on the suggestion for this contact id.
        #[arg(long)]
        reach_out: Option<String>,
    },
    /// Session and onboarding state.
    Session {
        #[command(subcommand)]
        command: commands::session::SessionCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with command output.
    // "aura" also matches every aura_* crate target.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("aura=info".parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let app = App::open(&project_root, cli.instant)?;

    let result = match &cli.command {
        Commands::Dashboard {
            strict,
            accept,
            json,
        } => commands::dashboard::execute(&app, *strict, *accept, *json).await,
        Commands::Chat { prompt } => commands::chat::execute(&app, prompt).await,
        Commands::Goal { command } => commands::goal::execute(command, &app).await,
        Commands::Automation { command } => commands::automation::execute(command, &app).await,
        Commands::Integration { command } => commands::integration::execute(command, &app),
        Commands::Finance { advisor, json } => {
            commands::finance::execute(&app, *advisor, *json).await
        }
        Commands::Wellness { json } => commands::wellness::execute(&app, *json).await,
        Commands::Relationships { reach_out } => {
            commands::relationships::execute(&app, reach_out.as_deref()).await
        }
        Commands::Session { command } => commands::session::execute(command, &app),
    };

    app.report_toasts();
    result
}
