//! Structured, non-fatal findings reported by the analysis stages.
//!
//! Every stage reports what went wrong (or what looks suspicious) through a [`DiagnosticSink`]
//! instead of failing. The [`report`] function also mirrors each diagnostic as a [`tracing`]
//! event, so the same information reaches the log when a subscriber is installed.

use std::fmt;
use tracing::{error, info, warn};

/// How serious a [`Diagnostic`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The analysis stage that produced a [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Validate,
    Derive,
    Locate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Validate => write!(f, "validate"),
            Self::Derive => write!(f, "derive"),
            Self::Locate => write!(f, "locate"),
        }
    }
}

/// A finding of one of the analysis stages.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub context: Stage,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, context: Stage, message: impl Into<String>) -> Self {
        Self { severity, context, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.context, self.message)
    }
}

/// Receives the diagnostics reported by an analysis stage.
///
/// This trait is implemented for `()`, which discards every diagnostic, and for
/// `Vec<Diagnostic>`, which keeps them in the order they were reported.
pub trait DiagnosticSink {
    /// Receives a diagnostic.
    fn push(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for () {
    fn push(&mut self, _: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn push(&mut self, diagnostic: Diagnostic) {
        Vec::push(self, diagnostic);
    }
}

/// Emits the diagnostic as a [`tracing`] event at the matching level, then hands it to the sink.
pub fn report(sink: &mut dyn DiagnosticSink, severity: Severity, context: Stage, message: impl Into<String>) {
    let diagnostic = Diagnostic::new(severity, context, message);
    match severity {
        Severity::Info => info!(stage = %context, "{}", diagnostic.message),
        Severity::Warning => warn!(stage = %context, "{}", diagnostic.message),
        Severity::Error => error!(stage = %context, "{}", diagnostic.message),
    }
    sink.push(diagnostic);
}
