use anyhow::Result;
use colored::Colorize;
use std::collections::HashMap;

use crate::config::{load_config, projects_dir};
use crate::render;
use crate::usage::pricing::estimate_cost;
use crate::usage::scanner::scan_all_sessions;
use crate::usage::types::SessionTotals;

/// Aggregate usage across all sessions: grand totals, per-project rollup,
/// and a per-day activity chart
pub async fn run(claude_dir: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let projects = projects_dir(claude_dir, &config)?;

    let entries = scan_all_sessions(&projects);
    if entries.is_empty() {
        println!("{}", render::NO_SESSION.dimmed());
        return Ok(());
    }

    let mut grand = SessionTotals::default();
    let mut by_project: HashMap<String, (SessionTotals, usize)> = HashMap::new();
    let mut by_date: HashMap<String, usize> = HashMap::new();

    for entry in &entries {
        let t = &entry.totals;
        grand.input_tokens += t.input_tokens;
        grand.output_tokens += t.output_tokens;
        grand.cache_creation_tokens += t.cache_creation_tokens;
        grand.cache_read_tokens += t.cache_read_tokens;

        let (proj, count) = by_project
            .entry(entry.project.clone())
            .or_insert_with(|| (SessionTotals::default(), 0));
        proj.input_tokens += t.input_tokens;
        proj.output_tokens += t.output_tokens;
        proj.cache_creation_tokens += t.cache_creation_tokens;
        proj.cache_read_tokens += t.cache_read_tokens;
        *count += 1;

        if let Some(date) = t
            .first_timestamp
            .as_deref()
            .and_then(extract_date_from_timestamp)
        {
            *by_date.entry(date).or_insert(0) += 1;
        }
    }

    let grand_cost = estimate_cost(&grand, &config.pricing);

    println!("\n  {}", "Usage Summary".bold().bright_yellow());
    println!("{}", "  ─────────────────────────────".dimmed());
    println!(
        "  {} {} sessions across {} projects",
        "Overview:".bold(),
        entries.len().to_string().bright_yellow(),
        by_project.len().to_string().bright_yellow()
    );
    println!(
        "  {} in {}  out {}  cache-w {}  cache-r {}",
        "Tokens:".bold(),
        render::format_tokens(grand.input_tokens).bright_yellow(),
        render::format_tokens(grand.output_tokens).bright_yellow(),
        render::format_tokens(grand.cache_creation_tokens).bright_yellow(),
        render::format_tokens(grand.cache_read_tokens).bright_yellow()
    );
    println!(
        "  {} {}",
        "Cost:".bold(),
        render::format_usd(grand_cost.total_cost).bright_green()
    );

    // Per-project rollup, largest spend first
    let mut projects_sorted: Vec<(&String, &(SessionTotals, usize))> = by_project.iter().collect();
    projects_sorted.sort_by(|a, b| {
        let ca = estimate_cost(&a.1 .0, &config.pricing).total_cost;
        let cb = estimate_cost(&b.1 .0, &config.pricing).total_cost;
        cb.partial_cmp(&ca).unwrap_or(std::cmp::Ordering::Equal)
    });

    println!("\n  {}", "Projects:".bold());
    for (name, (totals, count)) in &projects_sorted {
        let cost = estimate_cost(totals, &config.pricing);
        println!(
            "    {:<28} {:>3} {}  {:>8}  {:>8}",
            name.cyan(),
            count,
            if *count == 1 { "session " } else { "sessions" }.dimmed(),
            render::format_tokens(totals.total_tokens()).bright_yellow(),
            render::format_usd(cost.total_cost).bright_green()
        );
    }

    // Daily activity bar chart
    if !by_date.is_empty() {
        let mut dates: Vec<(&String, &usize)> = by_date.iter().collect();
        dates.sort_by(|a, b| a.0.cmp(b.0));
        let max_count = dates.iter().map(|(_, c)| **c).max().unwrap_or(1);

        println!("\n  {}", "Activity:".bold());
        for (date, count) in dates {
            let bar_len = (count * 30) / max_count.max(1);
            let bar: String = "\u{2588}".repeat(bar_len.max(1));
            println!(
                "  {} {} {}",
                date.dimmed(),
                bar.bright_yellow(),
                count.to_string().dimmed()
            );
        }
    }

    println!();
    Ok(())
}

/// Extract YYYY-MM-DD from an RFC 3339 timestamp string
fn extract_date_from_timestamp(ts: &str) -> Option<String> {
    chrono::DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.date_naive().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_from_timestamp() {
        assert_eq!(
            extract_date_from_timestamp("2026-02-05T18:48:19.274Z"),
            Some("2026-02-05".to_string())
        );
        assert_eq!(
            extract_date_from_timestamp("2026-01-15T00:00:00Z"),
            Some("2026-01-15".to_string())
        );
        assert_eq!(
            extract_date_from_timestamp("2026-02-05T18:48:19+09:00"),
            Some("2026-02-05".to_string())
        );
        assert_eq!(extract_date_from_timestamp("bad"), None);
        assert_eq!(extract_date_from_timestamp(""), None);
        // A bare date is not a timestamp
        assert_eq!(extract_date_from_timestamp("2026-02-05"), None);
    }
}
