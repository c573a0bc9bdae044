//! Export dispatch: per-callable thunks, the two-level lookup table, and
//! the fixed-signature trampoline.
//!
//! The interpreter side cannot hold native function references across the
//! boundary, so every export call arrives at one trampoline carrying only
//! two numeric IDs: component and callable. The generator lowers the
//! registry to a dense table: an outer array indexed by component ID, each
//! row holding a thunk array indexed by export-callable ID, so dispatch is
//! two bounds checks and an indexed call instead of nested switches. An
//! unmatched ID logs one diagnostic and returns neutrally; nothing faults
//! across the boundary.
//!
//! The table is regenerated with the rest of the artifact whenever the
//! registry changes. A stale table silently misroutes calls to the wrong
//! native function; dense IDs handed out by the registry builder are what
//! keep table position and declaration identity in lockstep.

use hpi_core::{CallableDecl, ComponentType, DiagnosticSink, RuntimeFault};
use hpi_registry::BridgeRegistry;

use crate::sig::{arg_list, parse_format};
use crate::source::SourceWriter;

/// Intermediate dispatch model: export callables grouped per component,
/// indexed exactly as the emitted table will be.
#[derive(Debug)]
pub struct DispatchTable<'a> {
    components: Vec<(&'a ComponentType, Vec<&'a CallableDecl>)>,
}

impl<'a> DispatchTable<'a> {
    pub fn build(registry: &'a BridgeRegistry) -> Self {
        let components = registry
            .components()
            .iter()
            .map(|comp| (comp, comp.exports().collect()))
            .collect();
        Self { components }
    }

    /// Every (component ID, callable ID, declaration) row, in table order.
    pub fn rows(&self) -> impl Iterator<Item = (u32, u32, &'a CallableDecl)> + '_ {
        self.components.iter().flat_map(|(comp, exports)| {
            exports
                .iter()
                .enumerate()
                .map(move |(i, tf)| (comp.id, i as u32, *tf))
        })
    }

    /// Resolve a dispatch request the way the generated trampoline does.
    ///
    /// A miss on either ID reports one [`RuntimeFault::DispatchMiss`] and
    /// resolves to nothing; no fault propagates to the caller.
    pub fn lookup(
        &self,
        component: u32,
        callable: u32,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<&'a CallableDecl> {
        let resolved = self
            .components
            .get(component as usize)
            .and_then(|(_, exports)| exports.get(callable as usize));
        match resolved {
            Some(tf) => Some(*tf),
            None => {
                sink.report(RuntimeFault::DispatchMiss {
                    component,
                    callable,
                });
                None
            }
        }
    }
}

/// Emit the thunks, the dispatch table, and the trampoline.
pub fn gen_export_dispatch(registry: &BridgeRegistry) -> String {
    let table = DispatchTable::build(registry);
    let mut w = SourceWriter::new();

    w.line("typedef void (*pyhpi_export_thunk)(PyObject *args_o);");
    w.blank();

    for (comp, exports) in &table.components {
        for tf in exports {
            emit_thunk(&mut w, &comp.qualified_name(tf), tf);
        }
    }

    for (comp, exports) in &table.components {
        if exports.is_empty() {
            continue;
        }
        w.line(format!(
            "static const pyhpi_export_thunk {}_thunks[] = {{",
            comp.name
        ));
        w.indent();
        for tf in exports {
            w.line(format!("&{}_thunk,", comp.qualified_name(tf)));
        }
        w.dedent();
        w.line("};");
        w.blank();
    }

    w.line("static const struct pyhpi_dispatch_entry {");
    w.indent();
    w.line("const pyhpi_export_thunk *thunks;");
    w.line("int count;");
    w.dedent();
    w.line("} pyhpi_dispatch_table[] = {");
    w.indent();
    if table.components.is_empty() {
        // C forbids empty aggregate initializers; the sentinel row is
        // unreachable because the length below is zero.
        w.line("{ 0, 0 },");
    } else {
        for (comp, exports) in &table.components {
            if exports.is_empty() {
                w.line(format!("{{ 0, 0 }}, /* {}: {} */", comp.id, comp.name));
            } else {
                w.line(format!(
                    "{{ {}_thunks, {} }}, /* {}: {} */",
                    comp.name,
                    exports.len(),
                    comp.id,
                    comp.name
                ));
            }
        }
    }
    w.dedent();
    w.line("};");
    w.blank();
    w.line(format!(
        "static const int pyhpi_dispatch_table_len = {};",
        table.components.len()
    ));
    w.blank();

    emit_trampoline(&mut w);
    w.finish()
}

fn emit_thunk(w: &mut SourceWriter, qname: &str, tf: &CallableDecl) {
    w.line(format!("static void {qname}_thunk(PyObject *args_o) {{"));
    w.indent();
    if tf.params.is_empty() {
        w.line("(void)args_o;");
        w.line(format!("{qname}();"));
    } else {
        for p in &tf.params {
            w.line(format!("{};", p.tag.c_local(&p.name)));
        }
        let mut parse = format!(
            "if (!PyArg_ParseTuple(args_o, \"{}\"",
            parse_format(&tf.params)
        );
        for p in &tf.params {
            parse.push_str(&format!(", &{}", p.name));
        }
        parse.push_str(")) {");
        w.line(parse);
        w.indent();
        w.line(format!(
            "fprintf(stdout, \"Error: bad argument tuple for {qname}\\n\");"
        ));
        w.line("return;");
        w.dedent();
        w.line("}");
        w.line(format!("{qname}({});", arg_list(&tf.params)));
    }
    w.dedent();
    w.line("}");
    w.blank();
}

fn emit_trampoline(w: &mut SourceWriter) {
    w.line("static PyObject *export_trampoline(PyObject *self, PyObject *args) {");
    w.indent();
    w.line("int bfm_id, tf_id, ctxt;");
    w.line("PyObject *args_o;");
    w.blank();
    w.line("if (!PyArg_ParseTuple(args, \"iiiO\", &bfm_id, &tf_id, &ctxt, &args_o)) {");
    w.indent();
    w.line("return 0;");
    w.dedent();
    w.line("}");
    w.blank();
    w.line("if (ctxt < 0 || ctxt >= prv_scope_count) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: unknown scope handle %d\\n\", ctxt);");
    w.line("return PyLong_FromLong(ctxt);");
    w.dedent();
    w.line("}");
    w.line("svSetScope(prv_scope_list[ctxt]);");
    w.blank();
    w.line("if (bfm_id < 0 || bfm_id >= pyhpi_dispatch_table_len) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: unknown BFM ID %d\\n\", bfm_id);");
    w.line("return PyLong_FromLong(ctxt);");
    w.dedent();
    w.line("}");
    w.line("if (tf_id < 0 || tf_id >= pyhpi_dispatch_table[bfm_id].count) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: unknown TF id %d in BFM %d\\n\", tf_id, bfm_id);");
    w.line("return PyLong_FromLong(ctxt);");
    w.dedent();
    w.line("}");
    w.line("pyhpi_dispatch_table[bfm_id].thunks[tf_id](args_o);");
    w.blank();
    w.line("return PyLong_FromLong(ctxt);");
    w.dedent();
    w.line("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpi_core::{Diagnostics, ParamDecl, TypeTag};
    use hpi_registry::RegistryBuilder;
    use rustc_hash::FxHashSet;

    fn two_components() -> hpi_registry::BridgeRegistry {
        RegistryBuilder::new()
            .component("Spi", |c| {
                c.export("write", None, [ParamDecl::new("data", TypeTag::Byte)])
                    .import("read_done", "read_done", None, [])
                    .export("flush", None, [])
            })
            .component("Uart", |c| c.export("tx", None, [ParamDecl::new("ch", TypeTag::UByte)]))
            .finish()
            .unwrap()
    }

    #[test]
    fn exactly_one_row_per_id_pair() {
        let registry = two_components();
        let table = DispatchTable::build(&registry);

        let mut seen = FxHashSet::default();
        for (comp_id, tf_id, _) in table.rows() {
            assert!(seen.insert((comp_id, tf_id)), "duplicate row");
        }
        assert_eq!(seen.len(), 3);
        assert!(seen.contains(&(0, 0)) && seen.contains(&(0, 1)) && seen.contains(&(1, 0)));
    }

    #[test]
    fn rows_resolve_to_the_declared_callable() {
        let registry = two_components();
        let table = DispatchTable::build(&registry);
        let mut sink = Diagnostics::new();

        assert_eq!(table.lookup(0, 0, &mut sink).unwrap().name, "write");
        assert_eq!(table.lookup(0, 1, &mut sink).unwrap().name, "flush");
        assert_eq!(table.lookup(1, 0, &mut sink).unwrap().name, "tx");
        assert!(sink.is_empty());
    }

    #[test]
    fn unknown_component_id_is_a_logged_noop() {
        let registry = two_components();
        let table = DispatchTable::build(&registry);
        let mut sink = Diagnostics::new();

        assert!(table.lookup(99, 0, &mut sink).is_none());
        assert_eq!(sink.count(), 1);
        assert!(matches!(
            sink.iter().next().unwrap(),
            RuntimeFault::DispatchMiss {
                component: 99,
                callable: 0
            }
        ));
    }

    #[test]
    fn unknown_callable_id_is_a_logged_noop() {
        let registry = two_components();
        let table = DispatchTable::build(&registry);
        let mut sink = Diagnostics::new();

        assert!(table.lookup(1, 5, &mut sink).is_none());
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn emitted_table_indexes_thunks_by_export_id() {
        let registry = two_components();
        let out = gen_export_dispatch(&registry);

        assert!(out.contains("static void Spi_write_thunk(PyObject *args_o) {"));
        assert!(out.contains("if (!PyArg_ParseTuple(args_o, \"b\", &data)) {"));
        assert!(out.contains("Spi_write(data);"));
        // Thunk array order matches export-ID order.
        let write = out.find("&Spi_write_thunk,").unwrap();
        let flush = out.find("&Spi_flush_thunk,").unwrap();
        assert!(write < flush);
        assert!(out.contains("{ Spi_thunks, 2 }, /* 0: Spi */"));
        assert!(out.contains("{ Uart_thunks, 1 }, /* 1: Uart */"));
        assert!(out.contains("static const int pyhpi_dispatch_table_len = 2;"));
        // Imports contribute nothing.
        assert!(!out.contains("read_done"));
    }

    #[test]
    fn zero_parameter_thunk_calls_directly() {
        let registry = two_components();
        let out = gen_export_dispatch(&registry);
        assert!(out.contains("static void Spi_flush_thunk(PyObject *args_o) {"));
        assert!(out.contains("(void)args_o;"));
        assert!(out.contains("Spi_flush();"));
    }

    #[test]
    fn empty_registry_still_emits_a_valid_table() {
        let registry = RegistryBuilder::new().finish().unwrap();
        let out = gen_export_dispatch(&registry);
        assert!(out.contains("{ 0, 0 },"));
        assert!(out.contains("static const int pyhpi_dispatch_table_len = 0;"));
        assert!(out.contains("static PyObject *export_trampoline(PyObject *self, PyObject *args) {"));
    }

    #[test]
    fn trampoline_reenters_scope_before_dispatch() {
        let registry = two_components();
        let out = gen_export_dispatch(&registry);
        let reenter = out.find("svSetScope(prv_scope_list[ctxt]);").unwrap();
        let dispatch = out
            .find("pyhpi_dispatch_table[bfm_id].thunks[tf_id](args_o);")
            .unwrap();
        assert!(reenter < dispatch);
    }
}
