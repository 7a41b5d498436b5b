use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{config_file_path, load_config, save_config};

/// Print the resolved configuration; `--init` persists it first so the
/// price table and watch settings can be edited on disk
pub async fn run(init: bool) -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;

    if init {
        save_config(&config)?;
        println!("{}", format!("[ccmon] Wrote {}", path.display()).dimmed());
    }

    println!("{}", format!("# {}", path.display()).dimmed());
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{}", rendered);

    Ok(())
}
