pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ccmon",
    version,
    about = "Token usage and cost monitor for Claude Code sessions"
)]
pub struct Cli {
    /// Claude data directory (default: ~/.claude)
    #[arg(long, global = true, value_name = "DIR", env = "CCMON_CLAUDE_DIR")]
    pub claude_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show usage and cost for the most recently active session
    Status {
        /// Emit machine-readable JSON instead of the formatted block
        #[arg(long)]
        json: bool,
    },
    /// Poll the latest session and redraw a one-line status
    Watch {
        /// Poll interval in seconds (overrides the config file)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
    /// List every session log with its usage and cost
    Sessions {
        /// Pick a session interactively and show its detail
        #[arg(long)]
        pick: bool,
    },
    /// Aggregate usage across all sessions
    Summary,
    /// Show the resolved configuration
    Config {
        /// Write the current configuration to its file, creating defaults
        #[arg(long)]
        init: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let claude_dir = cli.claude_dir.as_deref();
    match cli.command {
        Commands::Status { json } => commands::status::run(claude_dir, json).await,
        Commands::Watch { interval } => commands::watch::run(claude_dir, interval).await,
        Commands::Sessions { pick } => commands::sessions::run(claude_dir, pick).await,
        Commands::Summary => commands::summary::run(claude_dir).await,
        Commands::Config { init } => commands::config_cmd::run(init).await,
    }
}
