//! Import-direction bodies: native functions that call into the interpreter.
//!
//! Interpreter-side failure never propagates to the native caller; every
//! body logs to the diagnostic stream and returns a neutral status so the
//! simulator keeps running.

use hpi_core::{Binding, CallableDecl, ComponentType};

use crate::sig::{neutral_return, param_list, param_list_with_id, py_arg_list, ret_prefix};
use crate::source::SourceWriter;

/// Body of a global import callable.
///
/// Resolves the interpreter module named by the callable's binding, looks up
/// the attribute matching the callable's name, marshals each parameter, and
/// invokes positionally. Lookup failure logs and returns without invoking.
pub fn gen_global_import_impl(tf: &CallableDecl) -> String {
    let module = match &tf.binding {
        Binding::Module(module) => module.as_str(),
        // The registry builder guarantees global imports carry a module.
        _ => unreachable!("global import without a module binding"),
    };

    let mut w = SourceWriter::new();
    w.line(format!(
        "{}{}({}) {{",
        ret_prefix(tf.ret),
        tf.name,
        param_list(&tf.params)
    ));
    w.indent();
    w.line("PyObject *module, *call_ret, *f;");
    w.line(format!("module = PyImport_ImportModule(\"{module}\");"));
    w.line("if (!module) {");
    w.indent();
    w.line(format!(
        "fprintf(stdout, \"Error: failed to import module {module}\\n\");"
    ));
    w.line(neutral_return(tf.ret));
    w.dedent();
    w.line("}");
    w.line(format!("f = PyObject_GetAttrString(module, \"{}\");", tf.name));
    w.line("if (!f) {");
    w.indent();
    w.line(format!(
        "fprintf(stdout, \"Error: failed to find function {}\\n\");",
        tf.name
    ));
    w.line("Py_DECREF(module);");
    w.line(neutral_return(tf.ret));
    w.dedent();
    w.line("}");
    w.line(format!(
        "call_ret = PyObject_CallFunctionObjArgs(f, {});",
        py_arg_list(&tf.params)
    ));
    w.line("Py_DECREF(f);");
    w.line("Py_DECREF(module);");
    w.line(neutral_return(tf.ret));
    w.dedent();
    w.line("}");
    w.blank();
    w.finish()
}

/// Body of a component-owned import callable.
///
/// The implicit `id` is an identity lookup into the interpreter's
/// live-instance list; no scope re-entry happens here. The instance list is
/// resolved lazily, once per process.
pub fn gen_component_import_impl(comp: &ComponentType, tf: &CallableDecl) -> String {
    let method = match &tf.binding {
        Binding::Method(method) => method.as_str(),
        _ => unreachable!("component import without a method binding"),
    };

    let mut w = SourceWriter::new();
    w.line(format!(
        "{}{}({}) {{",
        ret_prefix(tf.ret),
        comp.qualified_name(tf),
        param_list_with_id(&tf.params)
    ));
    w.indent();
    w.line("if (!prv_hpi) {");
    w.indent();
    w.line("prv_hpi = PyImport_ImportModule(\"hpi\");");
    w.line("if (!prv_hpi) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: failed to import module 'hpi'\\n\");");
    w.line(neutral_return(tf.ret));
    w.dedent();
    w.line("}");
    w.line("prv_bfm_list = PyObject_GetAttrString(prv_hpi, \"bfm_list\");");
    w.dedent();
    w.line("}");
    w.line("PyObject *bfm = PyList_GetItem(prv_bfm_list, id);");
    w.line("PyObject *result = PyObject_CallMethodObjArgs(bfm,");
    w.indent();
    w.line(format!(
        "PyUnicode_FromString(\"{method}\"), {});",
        py_arg_list(&tf.params)
    ));
    w.dedent();
    w.line("if (!result) {");
    w.indent();
    w.line("PyErr_Print();");
    w.dedent();
    w.line("}");
    w.line(neutral_return(tf.ret));
    w.dedent();
    w.line("}");
    w.blank();
    w.finish()
}

/// Registration entry point for a component type, delegating to the scope
/// registry.
pub fn gen_register_impl(comp: &ComponentType) -> String {
    let mut w = SourceWriter::new();
    w.line(format!("int {}_register(const char *iname) {{", comp.name));
    w.indent();
    w.line(format!(
        "return pyhpi_register_bfm(\"{}\", iname);",
        comp.name
    ));
    w.dedent();
    w.line("}");
    w.blank();
    w.finish()
}
