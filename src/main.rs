mod cli;
mod config;
mod render;
mod usage;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli).await
}
