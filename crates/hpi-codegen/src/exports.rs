//! Export-direction entry points and the interpreter method table.
//!
//! Each export callable gets a `<name>_py` entry point taking one argument
//! tuple: the implicit scope-handle ID first, then the declared parameters
//! in order. The entry point re-enters the identified scope before the
//! native call runs. The method table is what the interpreter's
//! module-initialization step sees.

use hpi_core::CallableDecl;
use hpi_registry::BridgeRegistry;

use crate::sig::{arg_list, parse_format};
use crate::source::SourceWriter;

/// Entry point for one export callable, under its qualified native name.
pub fn gen_export_entry(qname: &str, tf: &CallableDecl) -> String {
    let mut w = SourceWriter::new();
    w.line(format!(
        "static PyObject *{qname}_py(PyObject *self, PyObject *args) {{"
    ));
    w.indent();
    w.line("unsigned int id;");
    for p in &tf.params {
        w.line(format!("{};", p.tag.c_local(&p.name)));
    }

    // Implicit leading integer, then the declared parse codes.
    let mut parse = format!("if (!PyArg_ParseTuple(args, \"i{}\", &id", parse_format(&tf.params));
    for p in &tf.params {
        parse.push_str(&format!(", &{}", p.name));
    }
    parse.push_str(")) {");
    w.line(parse);
    w.indent();
    w.line("return 0;");
    w.dedent();
    w.line("}");

    // Scope re-entry before the native call.
    w.line("svSetScope(prv_scope_list[id]);");
    w.line(format!("{qname}({});", arg_list(&tf.params)));
    w.line("return PyLong_FromLong(0);");
    w.dedent();
    w.line("}");
    w.blank();
    w.finish()
}

/// Method-table rows, global exports first, then per component in registry
/// order, the same order prototypes are emitted in.
pub fn gen_method_table_entries(registry: &BridgeRegistry) -> String {
    let mut w = SourceWriter::with_indent(1);

    for tf in registry.globals() {
        if tf.is_export() {
            w.line(method_table_entry(&tf.name));
        }
    }
    for comp in registry.components() {
        for tf in &comp.callables {
            if tf.is_export() {
                w.line(method_table_entry(&comp.qualified_name(tf)));
            }
        }
    }

    w.finish()
}

fn method_table_entry(qname: &str) -> String {
    format!("{{\"{qname}\", &{qname}_py, METH_VARARGS, \"\"}},")
}
