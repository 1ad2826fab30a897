//! Diagnostic output channels.
//!
//! Helpers write one-way, fire-and-forget lines; the sink owns the trace.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::HelperConfig;
use crate::{Error, Result};

pub const DEFAULT_LOG_LIMIT: usize = 10_000;

/// Output channel of a diagnostic line, mirroring the console methods the
/// helpers write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Log,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLine {
    pub severity: Severity,
    pub label: String,
    pub message: String,
}

impl DiagnosticLine {
    pub fn new(severity: Severity, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            label: label.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DiagnosticLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}

pub trait DiagnosticSink {
    fn emit(&self, line: DiagnosticLine);

    fn log(&self, label: &str, message: String) {
        self.emit(DiagnosticLine::new(Severity::Log, label, message));
    }

    fn info(&self, label: &str, message: String) {
        self.emit(DiagnosticLine::new(Severity::Info, label, message));
    }

    fn warn(&self, label: &str, message: String) {
        self.emit(DiagnosticLine::new(Severity::Warn, label, message));
    }

    fn error(&self, label: &str, message: String) {
        self.emit(DiagnosticLine::new(Severity::Error, label, message));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, line: DiagnosticLine) {
        (**self).emit(line);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Rc<S> {
    fn emit(&self, line: DiagnosticLine) {
        (**self).emit(line);
    }
}

#[derive(Debug)]
struct TraceState {
    lines: VecDeque<DiagnosticLine>,
    log_limit: usize,
    to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            lines: VecDeque::new(),
            log_limit: DEFAULT_LOG_LIMIT,
            to_stderr: false,
        }
    }
}

/// Recording sink with a bounded buffer. Clones share the same buffer, so a
/// clone handed to a deferred callback writes into the caller's trace.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    state: Rc<RefCell<TraceState>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_limit(max_entries: usize) -> Result<Self> {
        let log = Self::new();
        log.set_log_limit(max_entries)?;
        Ok(log)
    }

    /// A log capped at `config.log_limit`.
    pub fn from_config(config: &HelperConfig) -> Result<Self> {
        Self::with_log_limit(config.log_limit)
    }

    /// Caps the buffer, dropping the oldest lines first.
    pub fn set_log_limit(&self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidConfig(
                "log limit requires at least 1 entry".into(),
            ));
        }
        let mut state = self.state.borrow_mut();
        state.log_limit = max_entries;
        while state.lines.len() > state.log_limit {
            state.lines.pop_front();
        }
        Ok(())
    }

    /// Echoes every line to stderr as it is recorded.
    pub fn set_stderr(&self, enabled: bool) {
        self.state.borrow_mut().to_stderr = enabled;
    }

    pub fn lines(&self) -> Vec<DiagnosticLine> {
        self.state.borrow().lines.iter().cloned().collect()
    }

    pub fn take_lines(&self) -> Vec<DiagnosticLine> {
        self.state.borrow_mut().lines.drain(..).collect()
    }

    /// Rendered `label: message` form of every buffered line.
    pub fn messages(&self) -> Vec<String> {
        self.state
            .borrow()
            .lines
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().lines.is_empty()
    }
}

impl DiagnosticSink for TraceLog {
    fn emit(&self, line: DiagnosticLine) {
        let mut state = self.state.borrow_mut();
        if state.to_stderr {
            eprintln!("[{}] {line}", line.severity);
        }
        if state.lines.len() >= state.log_limit {
            state.lines.pop_front();
        }
        state.lines.push_back(line);
    }
}

/// Forwards every line to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, line: DiagnosticLine) {
        let DiagnosticLine {
            severity,
            label,
            message,
        } = line;
        match severity {
            Severity::Log | Severity::Info => tracing::info!(label = %label, "{message}"),
            Severity::Warn => tracing::warn!(label = %label, "{message}"),
            Severity::Error => tracing::error!(label = %label, "{message}"),
        }
    }
}
