//! JSONL activity log: append-only line-delimited JSON, one line per drill
//! event, agent-friendly to tail.
//!
//! Each line is a self-contained JSON object assembled in memory and written
//! with a single `write_all`, so concurrent tails never see a partial line.
//! A CLI invocation logs a handful of events and exits, so the writer opens
//! in append mode per record; on any failure it degrades to stderr with a
//! `[KFD-JSONL]` prefix. A drill must never fail because logging failed.

#![allow(missing_docs)]

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Event types matching the kfd activity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ScenarioGenerated,
    DiagnosisRun,
    Error,
}

/// A single JSONL entry; all fields optional except `ts`, `event`, `severity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// Seed of the drill involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// How many faults the selection chose (never which ones).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_count: Option<usize>,
    /// Directory the drill was rendered into or read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered_dir: Option<String>,
    /// KFD error code if the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
            severity,
            seed: None,
            difficulty: None,
            fault_count: None,
            rendered_dir: None,
            error_code: None,
            error_message: None,
            details: None,
        }
    }
}

/// Append-only activity log with stderr degradation.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one entry. Infallible by design; failures fall through to
    /// stderr and then to silent discard.
    pub fn record(&self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[KFD-JSONL] serialize error: {e}");
                return;
            }
        };
        if self.append(&line).is_err() {
            let _ = write!(io::stderr(), "[KFD-JSONL] {line}");
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_append_as_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("activity.jsonl"));

        let mut first = LogEntry::new(EventType::ScenarioGenerated, Severity::Info);
        first.seed = Some(42);
        first.difficulty = Some("easy".to_string());
        first.fault_count = Some(1);
        log.record(&first);

        let mut second = LogEntry::new(EventType::DiagnosisRun, Severity::Info);
        second.seed = Some(42);
        log.record(&second);

        let raw = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let parsed: LogEntry = serde_json::from_str(line).expect("valid JSON line");
            assert_eq!(parsed.seed, Some(42));
        }
    }

    #[test]
    fn optional_fields_are_omitted_not_null() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("activity.jsonl"));
        log.record(&LogEntry::new(EventType::Error, Severity::Critical));
        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert!(!raw.contains("null"), "skipped fields must not serialize: {raw}");
        assert!(raw.contains("\"event\":\"error\""));
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("nested").join("deep").join("a.jsonl"));
        log.record(&LogEntry::new(EventType::ScenarioGenerated, Severity::Info));
        assert!(log.path().exists());
    }
}
