use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::{load_config, projects_dir, Config};
use crate::render;
use crate::usage::pricing::estimate_cost;
use crate::usage::scanner::{locate_latest_session, scan_session};

/// Poll the latest session log on a fixed interval and redraw one line.
/// Ctrl-C exits.
pub async fn run(claude_dir: Option<&str>, interval_override: Option<u64>) -> Result<()> {
    let config = load_config()?;
    let projects = projects_dir(claude_dir, &config)?;
    let secs = interval_override.unwrap_or(config.watch.interval_secs).max(1);

    let mut ticker = interval(Duration::from_secs(secs));
    // A slow scan must not queue up extra ticks behind it
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let line = status_line(&projects, &config);
                print!("\r\x1b[2K{}", line);
                std::io::stdout().flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    Ok(())
}

/// Pure mapping from one poll tick to the displayed line
fn status_line(projects: &Path, config: &Config) -> String {
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();

    let found = locate_latest_session(projects)
        .and_then(|path| scan_session(&path).map(|totals| (path, totals)));

    match found {
        Some((_, totals)) => {
            let cost = estimate_cost(&totals, &config.pricing);
            let pct = render::context_pct(totals.last_context_tokens, config.watch.context_window);
            let gauge =
                render::context_gauge(totals.last_context_tokens, config.watch.context_window);
            format!(
                "{}  {}  {} {}  {} {}",
                clock.dimmed(),
                render::paint_context(&gauge, pct),
                "tokens".dimmed(),
                render::format_tokens(totals.total_tokens()).bright_yellow(),
                "cost".dimmed(),
                render::format_usd(cost.total_cost).bright_green()
            )
        }
        None => format!("{}  {}", clock.dimmed(), render::NO_SESSION.dimmed()),
    }
}
