//! Scope registry model: dense handles over opaque execution contexts.

use crate::decl::ScopeHandle;
use crate::diagnostics::DiagnosticSink;
use crate::error::RuntimeFault;

/// Growth-only table mapping dense integer handles to execution contexts.
///
/// Handles are assigned in registration order starting at 0 and are
/// permanent for the life of the table: never invalidated, never reused,
/// never reassigned. The table tracks one "current" context at a time;
/// [`reenter`](ScopeTable::reenter) is its only mutator, and the design
/// assumes a single logical thread of execution alternating between the
/// simulator and the interpreter.
#[derive(Debug, Default)]
pub struct ScopeTable<C> {
    entries: Vec<C>,
    current: Option<ScopeHandle>,
}

impl<C> ScopeTable<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: None,
        }
    }

    /// Append a context and return its permanent handle.
    ///
    /// The first registration yields handle 0.
    pub fn register(&mut self, context: C) -> ScopeHandle {
        let handle = ScopeHandle(self.entries.len() as u32);
        self.entries.push(context);
        handle
    }

    /// Switch the current context to the one stored at `handle`.
    ///
    /// An unknown handle is a [`RuntimeFault::LookupFailure`]: it is
    /// reported to the sink and the current context is left unchanged.
    /// Returns whether the switch happened.
    pub fn reenter(&mut self, handle: ScopeHandle, sink: &mut dyn DiagnosticSink) -> bool {
        if handle.index() < self.entries.len() {
            self.current = Some(handle);
            true
        } else {
            sink.report(RuntimeFault::LookupFailure(format!(
                "scope handle {handle} is not registered"
            )));
            false
        }
    }

    /// The context last re-entered, if any.
    pub fn current(&self) -> Option<&C> {
        self.current.map(|h| &self.entries[h.index()])
    }

    pub fn get(&self, handle: ScopeHandle) -> Option<&C> {
        self.entries.get(handle.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    #[test]
    fn handles_are_dense_and_ordered() {
        let mut table = ScopeTable::new();
        for i in 0..10 {
            let handle = table.register(format!("scope-{i}"));
            assert_eq!(handle, ScopeHandle(i));
        }
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn reenter_restores_registered_context() {
        let mut table = ScopeTable::new();
        let mut sink = Diagnostics::new();
        let a = table.register("ctx-a");
        let b = table.register("ctx-b");

        assert!(table.reenter(b, &mut sink));
        assert_eq!(table.current(), Some(&"ctx-b"));
        assert!(table.reenter(a, &mut sink));
        assert_eq!(table.current(), Some(&"ctx-a"));
        // Repeatable, independent of call order.
        assert!(table.reenter(a, &mut sink));
        assert_eq!(table.current(), Some(&"ctx-a"));
        assert!(sink.is_empty());
    }

    #[test]
    fn growth_preserves_registered_contexts() {
        let mut table = ScopeTable::new();
        let handles: Vec<_> = (0..1000).map(|i| table.register(i * 7)).collect();
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(table.get(*handle), Some(&(i as i32 * 7)));
        }
    }

    #[test]
    fn unknown_handle_degrades_to_logged_noop() {
        let mut table = ScopeTable::new();
        let mut sink = Diagnostics::new();
        let a = table.register("ctx-a");
        table.reenter(a, &mut sink);

        assert!(!table.reenter(ScopeHandle(99), &mut sink));
        // Current context unchanged, exactly one diagnostic.
        assert_eq!(table.current(), Some(&"ctx-a"));
        assert_eq!(sink.count(), 1);
        assert!(matches!(
            sink.iter().next().unwrap(),
            RuntimeFault::LookupFailure(_)
        ));
    }

    #[test]
    fn no_current_context_before_first_reenter() {
        let mut table = ScopeTable::new();
        table.register("ctx-a");
        assert_eq!(table.current(), None::<&&str>);
    }
}
