use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::types::*;

/// Scan a single JSONL session log into running totals.
///
/// Blank lines and lines that fail to parse are skipped individually; a bad
/// line never aborts the rest of the file. Only `"type": "assistant"` lines
/// that carry `message.usage` contribute to the totals. Returns `None` when
/// the file cannot be opened, which callers treat as "no session active";
/// an empty but readable file yields all-zero totals.
pub fn scan_session(path: &Path) -> Option<SessionTotals> {
    let file = fs::File::open(path).ok()?;
    let reader = BufReader::new(file);

    let mut totals = SessionTotals::default();

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        // Quick filter: only parse lines that look like assistant messages
        if !line.contains("\"type\":\"assistant\"") {
            continue;
        }

        let entry: LogLine = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(_) => continue,
        };

        if entry.kind.as_deref() != Some("assistant") {
            continue;
        }

        let message = match entry.message {
            Some(m) => m,
            None => continue,
        };

        let usage = match message.usage {
            Some(u) => u,
            None => continue,
        };

        totals.add(&usage);

        if let Some(model) = message.model {
            totals.model = Some(model);
        }
        if let Some(ts) = entry.timestamp {
            if totals.first_timestamp.is_none() {
                totals.first_timestamp = Some(ts.clone());
            }
            totals.last_timestamp = Some(ts);
        }
    }

    Some(totals)
}

/// Find the most recently modified session log under the projects root.
///
/// The tree is two levels: one directory per project, each holding `.jsonl`
/// session logs. Subdirectories that cannot be listed are skipped. On equal
/// modification times the file encountered first wins; enumeration order is
/// filesystem-dependent and the ambiguity is accepted.
pub fn locate_latest_session(projects_dir: &Path) -> Option<PathBuf> {
    let mut latest: Option<(PathBuf, SystemTime)> = None;

    for (path, modified) in session_files(projects_dir) {
        let modified = match modified {
            Some(m) => m,
            None => continue,
        };
        match &latest {
            Some((_, best)) if modified <= *best => {}
            _ => latest = Some((path, modified)),
        }
    }

    latest.map(|(path, _)| path)
}

/// Scan every session log under the projects root.
///
/// Returns one entry per readable `.jsonl` file that contains at least one
/// usage-bearing assistant turn, tagged with the project directory name and
/// the session id (file stem). Order is unspecified; callers sort for
/// display.
pub fn scan_all_sessions(projects_dir: &Path) -> Vec<SessionEntry> {
    let mut entries = Vec::new();

    for (path, modified) in session_files(projects_dir) {
        let session_id = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        let project = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(totals) = scan_session(&path) {
            // Logs that never produced a usage-bearing turn (user-only or
            // summary-only files) are not sessions worth listing
            if totals.turns == 0 {
                continue;
            }
            entries.push(SessionEntry {
                project,
                session_id,
                path,
                modified,
                totals,
            });
        }
    }

    entries
}

/// Enumerate `.jsonl` files one level below the projects root, with their
/// modification times. Unreadable directories are skipped.
fn session_files(projects_dir: &Path) -> Vec<(PathBuf, Option<SystemTime>)> {
    let mut files = Vec::new();

    let projects = match fs::read_dir(projects_dir) {
        Ok(entries) => entries,
        Err(_) => return files,
    };

    for project in projects.flatten() {
        let project_path = project.path();
        if !project_path.is_dir() {
            continue;
        }
        let sessions = match fs::read_dir(&project_path) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for session in sessions.flatten() {
            let path = session.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let modified = session.metadata().and_then(|m| m.modified()).ok();
            files.push((path, modified));
        }
    }

    files
}
