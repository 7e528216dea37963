//! User-facing status feed.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Kind of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Progress,
    Sent,
    Error,
}

/// One human-readable line of progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn progress(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Progress,
            text: text.into(),
        }
    }

    pub fn sent(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Sent,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Where status lines go.
pub trait StatusSink: Send + Sync {
    fn push(&self, line: StatusLine);
}

impl StatusSink for mpsc::UnboundedSender<StatusLine> {
    fn push(&self, line: StatusLine) {
        // A closed receiver means nobody is watching anymore.
        let _ = self.send(line);
    }
}

/// Append-only in-memory feed.
#[derive(Debug, Clone, Default)]
pub struct StatusFeed {
    lines: Arc<Mutex<Vec<StatusLine>>>,
}

impl StatusFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line so far.
    pub fn lines(&self) -> Vec<StatusLine> {
        self.lock().clone()
    }

    /// Text of every line so far.
    pub fn texts(&self) -> Vec<String> {
        self.lock().iter().map(|line| line.text.clone()).collect()
    }

    /// Lines that report errors.
    pub fn errors(&self) -> Vec<StatusLine> {
        self.lock()
            .iter()
            .filter(|line| line.is_error())
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StatusLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatusSink for StatusFeed {
    fn push(&self, line: StatusLine) {
        self.lock().push(line);
    }
}
