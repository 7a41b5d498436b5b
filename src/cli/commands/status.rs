use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{load_config, projects_dir, Config};
use crate::render;
use crate::usage::pricing::{estimate_cost, CostEstimate};
use crate::usage::scanner::{locate_latest_session, scan_session};
use crate::usage::types::SessionTotals;

/// Machine-readable status payload for `--json`
#[derive(Serialize)]
struct StatusReport {
    active: bool,
    session_path: Option<PathBuf>,
    totals: Option<SessionTotals>,
    cost: Option<CostEstimate>,
    context_window: u64,
}

/// Locate the most recently active session, scan it, price it, print it
pub async fn run(claude_dir: Option<&str>, json: bool) -> Result<()> {
    let config = load_config()?;
    let projects = projects_dir(claude_dir, &config)?;

    let found = locate_latest_session(&projects)
        .and_then(|path| scan_session(&path).map(|totals| (path, totals)));

    match found {
        Some((path, totals)) => {
            let cost = estimate_cost(&totals, &config.pricing);
            if json {
                let report = StatusReport {
                    active: true,
                    session_path: Some(path),
                    totals: Some(totals),
                    cost: Some(cost),
                    context_window: config.watch.context_window,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_status(&path, &totals, &cost, &config);
            }
        }
        None => {
            if json {
                let report = StatusReport {
                    active: false,
                    session_path: None,
                    totals: None,
                    cost: None,
                    context_window: config.watch.context_window,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render::NO_SESSION.dimmed());
            }
        }
    }

    Ok(())
}

fn print_status(path: &std::path::Path, totals: &SessionTotals, cost: &CostEstimate, config: &Config) {
    println!("\n{}", "  Claude Code Session".bold().bright_yellow());
    println!("{}", "  ─────────────────────────────".dimmed());

    println!("  {} {}", "Log:".bold(), path.display().to_string().dimmed());
    if let Some(model) = &totals.model {
        println!("  {} {}", "Model:".bold(), model.cyan());
    }
    if let Some(ts) = &totals.last_timestamp {
        println!("  {} {}", "Last turn:".bold(), ts.dimmed());
    }

    let pct = render::context_pct(totals.last_context_tokens, config.watch.context_window);
    let gauge = render::context_gauge(totals.last_context_tokens, config.watch.context_window);
    println!("  {} {}", "Context:".bold(), render::paint_context(&gauge, pct));

    println!(
        "  {} in {}  out {}  cache-w {}  cache-r {}  {} {}",
        "Tokens:".bold(),
        render::format_tokens(totals.input_tokens).bright_yellow(),
        render::format_tokens(totals.output_tokens).bright_yellow(),
        render::format_tokens(totals.cache_creation_tokens).bright_yellow(),
        render::format_tokens(totals.cache_read_tokens).bright_yellow(),
        "total".dimmed(),
        render::format_tokens(totals.total_tokens()).bright_yellow()
    );

    println!(
        "  {} {}  {}",
        "Cost:".bold(),
        render::format_usd(cost.total_cost).bright_green(),
        format!(
            "(in {}, out {}, cache-w {}, cache-r {})",
            render::format_usd(cost.input_cost),
            render::format_usd(cost.output_cost),
            render::format_usd(cost.cache_write_cost),
            render::format_usd(cost.cache_read_cost)
        )
        .dimmed()
    );
    println!();
}
