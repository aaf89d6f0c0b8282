//! CLI entry point for taskdeck.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskdeck_app::AppConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

/// In-memory task lists with filters, driven from the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about = "taskdeck: organize tasks into lists and filter them by status, text and color"
)]
struct Cli {
    /// Path to the configuration file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding persisted preferences.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an email address and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out.
    Logout,

    /// Show sign-in state and theme.
    Status,

    /// Show or change the theme preference (light, dark or system).
    Theme { value: Option<String> },

    /// Start an interactive session.
    Shell,
}

fn main() -> Result<()> {
    let Cli { config, data_dir, cmd } = Cli::parse();

    install_tracing();

    let mut config = AppConfig::load(config.as_deref())?;
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    commands::run(cmd, &config, &mut stdin.lock(), &mut stdout.lock())
}

fn install_tracing() {
    // RUST_LOG overrides the level; logs go to stderr so shell output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
