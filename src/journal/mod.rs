//! Operation Journal
//!
//! Append-only, human-readable log of mutating operations. One line per event:
//!
//! ```text
//! [2026-10-17T09:12:44.031+02:00] [MKDIR] docs - SUCCESS
//! ```
//!
//! The journal is best-effort observability. A failed append is reported on
//! the diagnostic channel (`tracing`) and never propagates to the operation
//! that triggered it. It is not part of the snapshot.

pub mod sink;

use crate::error::{OpError, StorageError};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub use sink::{FileJournalSink, JournalSink, MemoryJournalSink};

/// Status written when an operation begins.
pub const STATUS_START: &str = "START";
/// Status written when an operation succeeds.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// One journal record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub operation: String,
    pub target: String,
    pub status: String,
}

impl JournalEntry {
    /// Build an entry stamped with the local wall clock.
    pub fn now(operation: &str, target: &str, status: &str) -> Self {
        Self {
            timestamp: Local::now().fixed_offset(),
            operation: operation.to_string(),
            target: target.to_string(),
            status: status.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status.starts_with("FAIL")
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {} - {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
            self.operation,
            escape_controls(&self.target),
            self.status
        )
    }
}

/// Escape control characters so a record always stays on one line.
fn escape_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Split `rest` (`<target> - <status>`) at the status, which is read off
/// the end: `START`, `SUCCESS`, or `FAIL - <REASON>` with a known reason.
fn split_status(rest: &str) -> Option<(&str, &str)> {
    let failures = OpError::JOURNAL_REASONS
        .iter()
        .map(|reason| format!("FAIL - {}", reason));
    [STATUS_START.to_string(), STATUS_SUCCESS.to_string()]
        .into_iter()
        .chain(failures)
        .find_map(|status| {
            let target = rest.strip_suffix(status.as_str())?.strip_suffix(" - ")?;
            Some((target, &rest[target.len() + 3..]))
        })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed journal line: {0}")]
pub struct ParseJournalError(String);

impl FromStr for JournalEntry {
    type Err = ParseJournalError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseJournalError(line.to_string());

        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (timestamp, rest) = rest.split_once("] [").ok_or_else(malformed)?;
        let (operation, rest) = rest.split_once("] ").ok_or_else(malformed)?;

        let (target, status) = split_status(rest).ok_or_else(malformed)?;

        let timestamp = DateTime::parse_from_rfc3339(timestamp).map_err(|_| malformed())?;
        if operation.is_empty() || status.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            timestamp,
            operation: operation.to_string(),
            target: target.to_string(),
            status: status.to_string(),
        })
    }
}

/// Journal front: stamps records and hands them to a sink.
#[derive(Clone)]
pub struct Journal {
    sink: Arc<dyn JournalSink>,
}

impl Journal {
    pub fn new(sink: Arc<dyn JournalSink>) -> Self {
        Self { sink }
    }

    /// Journal appending to a log file at `path`.
    pub fn to_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileJournalSink::new(path)))
    }

    /// Append one record. Sink failures are logged and swallowed.
    pub fn record(&self, operation: &str, target: &str, status: &str) {
        let entry = JournalEntry::now(operation, target, status);
        if let Err(e) = self.sink.append(&entry) {
            tracing::error!(
                operation = operation,
                target = target,
                "Failed to write journal record: {}",
                e
            );
        }
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal").field("sink", &self.sink.describe()).finish()
    }
}

/// Read every parseable entry of the journal file at `path`.
///
/// A missing file is an empty journal. Lines that do not parse are skipped.
pub fn read_journal(path: &Path) -> Result<Vec<JournalEntry>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::IoError(e)),
    };

    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<JournalEntry>() {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!(
                "Skipping journal line {} in {}: {}",
                index + 1,
                path.display(),
                e
            ),
        }
    }
    Ok(entries)
}
