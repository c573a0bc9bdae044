//! Diagnostic sink for non-fatal runtime faults.
//!
//! The generated runtime never raises a fault across the foreign-function
//! boundary; it logs and degrades to a no-op. The Rust-side runtime model
//! mirrors that policy through [`DiagnosticSink`]: callers supply a sink,
//! faults flow into it, and the call returns neutrally. [`Diagnostics`]
//! collects faults for inspection (the form tests use); [`StderrSink`]
//! streams them, matching the generated code's diagnostic stream.

use std::collections::VecDeque;
use std::fmt;

use crate::error::RuntimeFault;

/// Receiver for non-fatal runtime faults.
pub trait DiagnosticSink {
    fn report(&mut self, fault: RuntimeFault);
}

/// A collecting sink.
///
/// Faults are kept in report order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    faults: VecDeque<RuntimeFault>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn count(&self) -> usize {
        self.faults.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuntimeFault> {
        self.faults.iter()
    }

    /// Faults matching a predicate, e.g. dispatch misses only.
    pub fn matching<'a>(
        &'a self,
        pred: impl Fn(&RuntimeFault) -> bool + 'a,
    ) -> impl Iterator<Item = &'a RuntimeFault> {
        self.faults.iter().filter(move |f| pred(f))
    }

    pub fn clear(&mut self) {
        self.faults.clear();
    }

    /// Write one line per fault to the given writer.
    pub fn emit<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for fault in &self.faults {
            writeln!(writer, "{fault}")?;
        }
        Ok(())
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, fault: RuntimeFault) {
        self.faults.push_back(fault);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fault in &self.faults {
            writeln!(f, "{fault}")?;
        }
        Ok(())
    }
}

/// Sink that streams each fault to stderr as it arrives.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, fault: RuntimeFault) {
        eprintln!("hpi: {fault}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_report_order() {
        let mut diags = Diagnostics::new();
        diags.report(RuntimeFault::LookupFailure("no module".into()));
        diags.report(RuntimeFault::DispatchMiss {
            component: 99,
            callable: 0,
        });
        assert_eq!(diags.count(), 2);
        let first = diags.iter().next().unwrap();
        assert!(matches!(first, RuntimeFault::LookupFailure(_)));
    }

    #[test]
    fn matching_filters_by_kind() {
        let mut diags = Diagnostics::new();
        diags.report(RuntimeFault::MarshalError("bad tuple".into()));
        diags.report(RuntimeFault::DispatchMiss {
            component: 1,
            callable: 2,
        });
        let misses: Vec<_> = diags
            .matching(|f| matches!(f, RuntimeFault::DispatchMiss { .. }))
            .collect();
        assert_eq!(misses.len(), 1);
    }

    #[test]
    fn emit_writes_one_line_per_fault() {
        let mut diags = Diagnostics::new();
        diags.report(RuntimeFault::Configuration("not initialized".into()));
        let mut out = Vec::new();
        diags.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("not initialized"));
    }
}
