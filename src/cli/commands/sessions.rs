use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, FuzzySelect};

use crate::config::{load_config, projects_dir, Config};
use crate::render;
use crate::usage::pricing::estimate_cost;
use crate::usage::scanner::scan_all_sessions;
use crate::usage::types::SessionEntry;

/// List every session log, most recently modified first
pub async fn run(claude_dir: Option<&str>, pick: bool) -> Result<()> {
    let config = load_config()?;
    let projects = projects_dir(claude_dir, &config)?;

    let mut entries = scan_all_sessions(&projects);
    if entries.is_empty() {
        println!("{}", render::NO_SESSION.dimmed());
        return Ok(());
    }
    entries.sort_by(|a, b| b.modified.cmp(&a.modified));

    if pick {
        let labels: Vec<String> = entries
            .iter()
            .map(|e| format!("{}/{}", e.project, e.session_id))
            .collect();
        let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Session")
            .items(&labels)
            .default(0)
            .interact()?;
        print_detail(&entries[choice], &config);
        return Ok(());
    }

    println!(
        "\n  {}",
        format!("Sessions ({} total)", entries.len()).bold().bright_yellow()
    );
    println!("{}", "  ─────────────────────────────".dimmed());

    for entry in &entries {
        let cost = estimate_cost(&entry.totals, &config.pricing);
        let when = entry
            .modified
            .map(|m| DateTime::<Local>::from(m).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {}  {:<24} {:<12} {:>8}  {:>8}",
            when.dimmed(),
            entry.project,
            short_id(&entry.session_id).cyan(),
            render::format_tokens(entry.totals.total_tokens()).bright_yellow(),
            render::format_usd(cost.total_cost).bright_green()
        );
    }
    println!();

    Ok(())
}

fn print_detail(entry: &SessionEntry, config: &Config) {
    let totals = &entry.totals;
    let cost = estimate_cost(totals, &config.pricing);

    println!(
        "\n  {}",
        format!("{}/{}", entry.project, entry.session_id).bold().bright_yellow()
    );
    println!("{}", "  ─────────────────────────────".dimmed());
    println!("  {} {}", "Log:".bold(), entry.path.display().to_string().dimmed());
    if let Some(model) = &totals.model {
        println!("  {} {}", "Model:".bold(), model.cyan());
    }
    if let (Some(first), Some(last)) = (&totals.first_timestamp, &totals.last_timestamp) {
        println!("  {} {} {} {}", "Span:".bold(), first.dimmed(), "→".dimmed(), last.dimmed());
    }

    let pct = render::context_pct(totals.last_context_tokens, config.watch.context_window);
    let gauge = render::context_gauge(totals.last_context_tokens, config.watch.context_window);
    println!("  {} {}", "Context:".bold(), render::paint_context(&gauge, pct));

    println!(
        "  {} in {}  out {}  cache-w {}  cache-r {}",
        "Tokens:".bold(),
        render::format_tokens(totals.input_tokens).bright_yellow(),
        render::format_tokens(totals.output_tokens).bright_yellow(),
        render::format_tokens(totals.cache_creation_tokens).bright_yellow(),
        render::format_tokens(totals.cache_read_tokens).bright_yellow()
    );
    println!(
        "  {} {}",
        "Cost:".bold(),
        render::format_usd(cost.total_cost).bright_green()
    );
    println!();
}

/// Session ids are UUIDs; the first block is enough to tell them apart
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0c9e7b2a-4f6d-4a1e-9c3b-2d8f0a1b2c3d"), "0c9e7b2a");
        assert_eq!(short_id("plain"), "plain");
    }
}
