use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// One line of a session log, as written by Claude Code.
/// Only the fields the scanner cares about; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct LogLine {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<LogMessage>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogMessage {
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Token counters for a single model turn. Absent fields count as zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
}

impl TokenUsage {
    /// Tokens occupying the context window after this turn:
    /// everything on the input side, cache included.
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens + self.cache_creation_input_tokens + self.cache_read_input_tokens
    }
}

/// Token usage aggregated over one session log.
///
/// The four token counters are cumulative sums across all assistant turns;
/// `last_context_tokens` is overwritten by each turn and reflects only the
/// most recent one.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SessionTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
    pub last_context_tokens: u64,
    /// Number of assistant turns that carried usage data
    pub turns: u64,
    /// Model name of the most recent assistant turn
    pub model: Option<String>,
    /// Earliest timestamp seen among counted turns
    pub first_timestamp: Option<String>,
    /// Latest timestamp seen among counted turns
    pub last_timestamp: Option<String>,
}

impl SessionTotals {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens + self.cache_creation_tokens + self.cache_read_tokens
    }

    pub fn add(&mut self, usage: &TokenUsage) {
        self.input_tokens += usage.input_tokens;
        self.output_tokens += usage.output_tokens;
        self.cache_creation_tokens += usage.cache_creation_input_tokens;
        self.cache_read_tokens += usage.cache_read_input_tokens;
        self.last_context_tokens = usage.context_tokens();
        self.turns += 1;
    }
}

/// One scanned session log with its location metadata
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    /// Project directory name under the projects root
    pub project: String,
    /// File stem of the session log
    pub session_id: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub modified: Option<SystemTime>,
    pub totals: SessionTotals,
}
