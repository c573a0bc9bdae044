//! End-to-end generation over synthetic registries.

use hpi_codegen::generate_dpi;
use hpi_core::{ParamDecl, TypeTag};
use hpi_registry::{BridgeRegistry, RegistryBuilder};

fn spi_registry() -> BridgeRegistry {
    RegistryBuilder::new()
        .component("Spi", |c| {
            c.export("write", None, [ParamDecl::new("data", TypeTag::Byte)])
                .import("read_done", "read_done", None, [])
        })
        .finish()
        .unwrap()
}

#[test]
fn spi_example_produces_the_expected_artifact() {
    let registry = spi_registry();
    let out = generate_dpi(&registry, "pyhpi_dpi.c", "hpigen dpi -m spi.json").unwrap();

    // Prototypes: export without implicit id, import with it, registration.
    assert!(out.contains("void Spi_write(char data);"));
    assert!(out.contains("void Spi_read_done(int id);"));
    assert!(out.contains("int Spi_register(const char *iname);"));

    // Export entry point unpacks the implicit id plus the byte parameter.
    assert!(out.contains("static PyObject *Spi_write_py(PyObject *self, PyObject *args) {"));
    assert!(out.contains("if (!PyArg_ParseTuple(args, \"ib\", &id, &data)) {"));

    // Dispatch: component ID 0 / callable ID 0 unpacks the byte and calls
    // the native export.
    assert!(out.contains("static void Spi_write_thunk(PyObject *args_o) {"));
    assert!(out.contains("if (!PyArg_ParseTuple(args_o, \"b\", &data)) {"));
    assert!(out.contains("Spi_write(data);"));
    assert!(out.contains("{ Spi_thunks, 1 }, /* 0: Spi */"));

    // Exactly one method-table row, naming the export.
    assert_eq!(out.matches("{\"Spi_write\", &Spi_write_py, METH_VARARGS, \"\"},").count(), 1);
    assert!(!out.contains("{\"Spi_read_done\""));
}

#[test]
fn parameter_order_is_identical_across_all_three_artifacts() {
    let registry = RegistryBuilder::new()
        .component("Mem", |c| {
            c.export(
                "xfer",
                Some(TypeTag::Int),
                [
                    ParamDecl::new("addr", TypeTag::UInt),
                    ParamDecl::new("data", TypeTag::ULong),
                    ParamDecl::new("tag", TypeTag::Str),
                ],
            )
        })
        .finish()
        .unwrap();
    let out = generate_dpi(&registry, "pyhpi_dpi.c", "test").unwrap();

    // Prototype order.
    assert!(out.contains(
        "int Mem_xfer(unsigned int addr, unsigned long long data, const char *tag);"
    ));
    // Entry-point unpacking order (implicit id first).
    assert!(out.contains("if (!PyArg_ParseTuple(args, \"ils\", &id, &addr, &data, &tag)) {"));
    // Thunk unpacking and forwarding order.
    assert!(out.contains("if (!PyArg_ParseTuple(args_o, \"ils\", &addr, &data, &tag)) {"));
    assert_eq!(out.matches("Mem_xfer(addr, data, tag);").count(), 2);
}

#[test]
fn empty_registry_produces_a_well_formed_artifact() {
    let registry = RegistryBuilder::new().finish().unwrap();
    let out = generate_dpi(&registry, "pyhpi_dpi.c", "hpigen dpi").unwrap();

    // All placeholders were substituted.
    assert!(!out.contains("${"));
    // Empty prototype and marshalling sections, but the fixed machinery
    // is intact.
    assert!(out.contains("int pyhpi_init(void);"));
    assert!(out.contains("static PyObject *set_context(PyObject *self, PyObject *args) {"));
    assert!(out.contains("static PyObject *export_trampoline(PyObject *self, PyObject *args) {"));
    assert!(out.contains("static const int pyhpi_dispatch_table_len = 0;"));
    assert!(out.contains("{\"set_context\", &set_context, METH_VARARGS, \"\"},"));
}

#[test]
fn globals_are_emitted_before_components() {
    let registry = RegistryBuilder::new()
        .global_import(
            "sim_log",
            "hpi",
            None,
            [ParamDecl::new("msg", TypeTag::Str)],
        )
        .global_export("tick", Some(TypeTag::Int), [])
        .component("Spi", |c| c.export("write", None, []))
        .finish()
        .unwrap();
    let out = generate_dpi(&registry, "pyhpi_dpi.c", "test").unwrap();

    let sim_log = out.find("void sim_log(const char *msg);").unwrap();
    let spi_reg = out.find("int Spi_register(const char *iname);").unwrap();
    assert!(sim_log < spi_reg);

    // Global import resolves through its declared module; global export
    // lands in the method table ahead of component exports.
    assert!(out.contains("PyImport_ImportModule(\"hpi\");"));
    let tick_row = out.find("{\"tick\", &tick_py").unwrap();
    let write_row = out.find("{\"Spi_write\", &Spi_write_py").unwrap();
    assert!(tick_row < write_row);
}

#[test]
fn unknown_dispatch_ids_degrade_to_one_diagnostic_each() {
    let registry = spi_registry();
    let out = generate_dpi(&registry, "pyhpi_dpi.c", "test").unwrap();

    // The trampoline bounds-checks both IDs and logs exactly one
    // diagnostic per miss kind before returning neutrally.
    assert_eq!(out.matches("Error: unknown BFM ID %d").count(), 1);
    assert_eq!(out.matches("Error: unknown TF id %d in BFM %d").count(), 1);
    let check = out.find("if (bfm_id < 0 || bfm_id >= pyhpi_dispatch_table_len) {").unwrap();
    let invoke = out.find("pyhpi_dispatch_table[bfm_id].thunks[tf_id](args_o);").unwrap();
    assert!(check < invoke);
}

#[test]
fn artifact_header_names_file_and_command() {
    let registry = spi_registry();
    let out = generate_dpi(&registry, "bridge.c", "hpigen dpi -m spi.json -o bridge.c").unwrap();
    assert!(out.contains(" * bridge.c"));
    assert!(out.contains("Generated using the command: hpigen dpi -m spi.json -o bridge.c"));
}
