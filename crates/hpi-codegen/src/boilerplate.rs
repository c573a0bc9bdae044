//! Fixed boilerplate for the generated artifact.
//!
//! The template carries everything that does not depend on the registry:
//! includes, forward declarations, the interpreter module descriptor, and
//! the initialization entry point. Generated sections land in the named
//! placeholders.

/// Artifact template. Placeholders: `filename`, `command`,
/// `dpi_prototypes`, `scope_registry`, `dpi_tf_impl`, `export_dispatch`,
/// `hpi_method_table_entries`.
pub const DPI_TEMPLATE: &str = r##"/****************************************************************************
 * ${filename}
 *
 * Note: This file is generated. Do Not Edit
 *
 * Provides a DPI interface between SystemVerilog and Python.
 * Generated using the command: ${command}
 ****************************************************************************/
#include <stdint.h>
#include <stdio.h>
#include <stdlib.h>
#include <string.h>
#include "Python.h"

#ifdef __cplusplus
extern "C" {
#endif /* __cplusplus */

${dpi_prototypes}
// Prototype for initialization function
int pyhpi_init(void);

// Initialization function for the launcher. Called before the first BFM
// is registered
int pyhpi_launcher_init(void);

static int pyhpi_register_bfm(const char *tname, const char *iname);

// DPI functions
void *svGetScope(void);
void svSetScope(void *);

#ifdef __cplusplus
}
#endif /* __cplusplus */

// Scope registry: dense handle -> simulator scope
${scope_registry}

// Task/function implementations
${dpi_tf_impl}
// Export dispatch
${export_dispatch}

// Python module initialization table
static PyMethodDef hpi_exp_methods[] = {
    {"set_context", &set_context, METH_VARARGS, ""},
    {"export_trampoline", &export_trampoline, METH_VARARGS, ""},
${hpi_method_table_entries}    { 0, 0, 0, 0}
};

static PyModuleDef hpi_e = {
        PyModuleDef_HEAD_INIT,
        "hpi_e",
        "",
        -1,
        hpi_exp_methods,
        0,
        0,
        0,
        0
};

static PyObject *PyInit_hpi_e(void) {
    return PyModule_Create(&hpi_e);
}

int pyhpi_init(void) {
    // Add the exports module to the initialization table
    PyImport_AppendInittab("hpi_e", PyInit_hpi_e);
    return 1;
}
"##;
