//! Pure display helpers: mappings from aggregated usage to strings.
//! No I/O and no shared state; commands compose these into their output.

use colored::{ColoredString, Colorize};

/// Shown whenever no session log can be found or read
pub const NO_SESSION: &str = "no active session";

/// Humanize a token count: 999, 12.3k, 1.2M
pub fn format_tokens(n: u64) -> String {
    if n < 1_000 {
        n.to_string()
    } else if n < 1_000_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    }
}

/// Display rounding for dollar amounts happens here, not in the estimator
pub fn format_usd(amount: f64) -> String {
    if amount > 0.0 && amount < 0.01 {
        "<$0.01".to_string()
    } else {
        format!("${:.2}", amount)
    }
}

/// Context-window occupancy as a percentage, capped at 100
pub fn context_pct(used: u64, window: u64) -> f64 {
    if window == 0 {
        return 0.0;
    }
    (used as f64 / window as f64 * 100.0).min(100.0)
}

/// Color the gauge by occupancy: green below 60%, yellow below 85%, red above
pub fn paint_context(text: &str, pct: f64) -> ColoredString {
    if pct < 60.0 {
        text.green()
    } else if pct < 85.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// One-line context gauge, e.g. "ctx 142.3k/200.0k (71%)"
pub fn context_gauge(used: u64, window: u64) -> String {
    let pct = context_pct(used, window);
    format!(
        "ctx {}/{} ({:.0}%)",
        format_tokens(used),
        format_tokens(window),
        pct
    )
}
