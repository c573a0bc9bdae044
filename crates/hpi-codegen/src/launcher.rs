//! Fixed launcher assets: the native bootstrap and the SystemVerilog shim
//! that starts the interpreter-side testbench.
//!
//! Consumed verbatim; nothing here depends on the registry.

/// Native launcher: interpreter bootstrap, argument capture, and the
/// `tb_init` / `tb_main` handoff.
pub const LAUNCHER_C: &str = r##"/****************************************************************************
 * pyhpi_launcher.c
 *
 * SystemVerilog DPI launcher for the Python testbench.
 ****************************************************************************/
#include <stdint.h>
#include <stdio.h>
#include "Python.h"

#ifdef __cplusplus
extern "C" {
#endif

int pyhpi_init(void);
int pyhpi_launcher_init(void);
void *svGetScope(void);
void svSetScope(void *);
int acc_fetch_argc(void);
char **acc_fetch_argv(void);
int pyhpi_sv_launcher_main(void);
int pyhpi_sv_launcher_init(void);

#ifdef __cplusplus
}
#endif

static unsigned int prv_initialized = 0;
static void *prv_pkg_scope = 0;
static PyObject *prv_args;
static PyObject *prv_hpi;

// Called before the first BFM registers
int pyhpi_launcher_init(void) {
    PyObject *ret;
    int i;

    if (prv_initialized) {
        return 1;
    }
    prv_initialized = 1;

    // Capture all simulator arguments for the testbench
    prv_args = PyList_New(0);
    {
        int argc = acc_fetch_argc();
        char **argv = acc_fetch_argv();
        for (i = 0; i < argc; i++) {
            PyList_Append(prv_args, PyUnicode_FromString(argv[i]));
        }
    }

    // Register the exports module before the interpreter starts
    pyhpi_init();

    Py_Initialize();

    prv_hpi = PyImport_ImportModule("hpi");
    if (!prv_hpi) {
        fprintf(stdout, "Error: failed to import 'hpi' package\n");
        return 0;
    }

    ret = PyObject_CallFunctionObjArgs(
        PyObject_GetAttrString(prv_hpi, "tb_init"),
        prv_args, 0);
    if (!ret) {
        fprintf(stdout, "Error calling tb_init\n");
        return 0;
    }

    return 1;
}

int pyhpi_sv_launcher_main(void) {
    PyObject *ret = PyObject_CallFunctionObjArgs(
        PyObject_GetAttrString(prv_hpi, "tb_main"), 0);
    if (!ret) {
        fprintf(stdout, "Error calling tb_main\n");
        PyErr_Print();
    }
    return 0;
}

int pyhpi_sv_launcher_init(void) {
    prv_pkg_scope = svGetScope();
    pyhpi_launcher_init();
    return 1;
}
"##;

/// SystemVerilog shim module importing the launcher entry points.
pub const LAUNCHER_SV: &str = r##"module pyhpi_sv;

    import "DPI-C" context task pyhpi_sv_launcher_main();
    initial begin
        repeat (100) begin
            #0;
        end
        pyhpi_sv_launcher_main();
    end

    import "DPI-C" context function int pyhpi_sv_launcher_init();
    int init = pyhpi_sv_launcher_init();

endmodule
"##;

/// Default file names for the launcher assets.
pub const LAUNCHER_C_FILE: &str = "pyhpi_launcher.c";
pub const LAUNCHER_SV_FILE: &str = "pyhpi_sv.sv";
