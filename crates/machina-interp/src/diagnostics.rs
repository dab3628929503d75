//! The advisory diagnostic channel.
//!
//! Warnings do not abort evaluation: an undefined operand reaching a
//! logical operator yields `undef` plus a warning, and the step goes on.
//! The driver accumulates warnings; the scheduler drains them after the
//! step. Diagnostics serialize to JSON so hosts can record them.

use crate::ast::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity.
///
/// Fatal-for-step conditions travel as [`EvalError`](crate::EvalError)
/// values; `Error` is used when a scheduler records a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The construct or subsystem that raised it.
    pub source: String,
    pub message: String,
    /// The node the diagnostic is about, when one applies.
    pub node: Option<NodeId>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        source: impl Into<String>,
        message: impl Into<String>,
        node: Option<NodeId>,
    ) -> Self {
        Self {
            severity,
            source: source.into(),
            message: message.into(),
            node,
        }
    }

    /// An advisory warning.
    pub fn warning(
        source: impl Into<String>,
        message: impl Into<String>,
        node: Option<NodeId>,
    ) -> Self {
        Self::new(Severity::Warning, source, message, node)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{sev}[{}]: {}", self.source, self.message)
    }
}
