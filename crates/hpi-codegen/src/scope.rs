//! Generated scope registry: dense handles over simulator scopes.
//!
//! The emitted C keeps a growth-only array mapping integer handles to
//! `svGetScope()` pointers, with separate count and capacity so growth is
//! bookkept correctly. Only the handle ever crosses to the interpreter;
//! the scope pointer stays on the native side and is reachable solely
//! through `set_context` / the trampoline's re-entry.

use crate::source::SourceWriter;

/// Emit the scope-registry state and operations.
///
/// Registry-independent, but emitted (rather than pasted into the fixed
/// boilerplate) so the runtime-support contract lives next to the
/// generators that depend on it.
pub fn gen_scope_registry() -> String {
    let mut w = SourceWriter::new();

    w.line("static void **prv_scope_list = 0;");
    w.line("static int prv_scope_count = 0;");
    w.line("static int prv_scope_cap = 0;");
    w.line("static int prv_initialized = 0;");
    w.line("static PyObject *prv_hpi = 0;");
    w.line("static PyObject *prv_bfm_list = 0;");
    w.blank();

    // Explicit context switch, callable from the interpreter side.
    w.line("static PyObject *set_context(PyObject *self, PyObject *args) {");
    w.indent();
    w.line("int id;");
    w.line("if (!PyArg_ParseTuple(args, \"i\", &id)) {");
    w.indent();
    w.line("return 0;");
    w.dedent();
    w.line("}");
    w.line("if (id < 0 || id >= prv_scope_count) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: unknown scope handle %d\\n\", id);");
    w.line("return PyLong_FromLong(id);");
    w.dedent();
    w.line("}");
    w.line("svSetScope(prv_scope_list[id]);");
    w.line("return PyLong_FromLong(id);");
    w.dedent();
    w.line("}");
    w.blank();

    w.line("static int pyhpi_register_bfm(const char *tname, const char *iname) {");
    w.indent();
    w.line("PyObject *hpi, *reg_func;");
    w.line("int ret = 0;");
    w.blank();
    w.line("if (!prv_initialized) {");
    w.indent();
    w.line("pyhpi_launcher_init();");
    w.line("prv_initialized = 1;");
    w.dedent();
    w.line("}");
    w.blank();
    w.line("if (prv_scope_count >= prv_scope_cap) {");
    w.indent();
    w.line("int new_cap = (prv_scope_cap == 0) ? 64 : prv_scope_cap * 2;");
    w.line("void **grown = (void **)malloc(sizeof(void *) * new_cap);");
    w.line("if (!grown) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: failed to grow the scope registry\\n\");");
    w.line("return -1;");
    w.dedent();
    w.line("}");
    w.line("if (prv_scope_list) {");
    w.indent();
    w.line("memcpy(grown, prv_scope_list, sizeof(void *) * prv_scope_count);");
    w.line("free(prv_scope_list);");
    w.dedent();
    w.line("}");
    w.line("prv_scope_list = grown;");
    w.line("prv_scope_cap = new_cap;");
    w.dedent();
    w.line("}");
    w.line("prv_scope_list[prv_scope_count] = svGetScope();");
    w.line("ret = prv_scope_count;");
    w.line("prv_scope_count++;");
    w.blank();
    w.line("/* Create and register the instance on the interpreter side. Only");
    w.line(" * the handle crosses the boundary; the scope pointer stays here. */");
    w.line("if (!(hpi = PyImport_ImportModule(\"hpi\"))) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: failed to import module 'hpi'\\n\");");
    w.line("return -1;");
    w.dedent();
    w.line("}");
    w.line("reg_func = PyObject_GetAttrString(hpi, \"register_bfm\");");
    w.line("if (!reg_func) {");
    w.indent();
    w.line("fprintf(stdout, \"Error: module 'hpi' has no attribute 'register_bfm'\\n\");");
    w.line("return -1;");
    w.dedent();
    w.line("}");
    w.line("PyObject_CallFunctionObjArgs(reg_func,");
    w.indent();
    w.line("PyUnicode_FromString(tname),");
    w.line("PyUnicode_FromString(iname),");
    w.line("PyLong_FromLong(ret),");
    w.line("0);");
    w.dedent();
    w.blank();
    w.line("return ret;");
    w.dedent();
    w.line("}");

    w.finish()
}
