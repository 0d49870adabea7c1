#![deny(missing_docs)]

//! # Diagnostics
//!
//! A non-fatal diagnostics collector threaded through the generators.
//!
//! The engine never writes to a global logger: every warning or recoverable
//! error is appended here and handed back to the caller together with the
//! generated source, so the engine stays a pure function of its input.

use derive_more::Display;

/// Severity of a collected diagnostic.
///
/// `Error` here is still non-fatal: the offending unit degrades to a
/// placeholder and generation continues. Fatal conditions are `AppError`s.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Suspicious input; output is still fully usable.
    #[display("warning")]
    Warning,
    /// Broken input; the offending unit was dropped or stubbed out.
    #[display("error")]
    Error,
}

/// One collected diagnostic message.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{severity}: {message}")]
pub struct Diagnostic {
    /// How bad it is.
    pub severity: Severity,
    /// Human-readable description of the offending unit.
    pub message: String,
}

/// Ordered collection of diagnostics for one generation run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Diagnostics in the order they were raised during traversal.
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    /// Records a non-fatal error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    /// True when nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the collected diagnostics in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_order_is_preserved() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("first");
        diagnostics.error("second");
        diagnostics.warn("third");

        let severities: Vec<Severity> = diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Warning, Severity::Error, Severity::Warning]
        );
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_display_is_prefixed_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error("responses missing on GET /pets");
        let rendered = diagnostics.iter().next().unwrap().to_string();
        assert_eq!(rendered, "error: responses missing on GET /pets");
    }

    #[test]
    fn test_empty() {
        assert!(Diagnostics::new().is_empty());
    }
}
