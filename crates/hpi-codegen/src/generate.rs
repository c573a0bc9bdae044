//! Top-level artifact assembly.

use rustc_hash::FxHashMap;

use hpi_core::{Direction, GenError};
use hpi_registry::BridgeRegistry;

use crate::template::Template;
use crate::{boilerplate, dispatch, exports, imports, prototypes, scope};

/// Generate the complete DPI bridge source.
///
/// `filename` is recorded in the artifact header; `command` is the
/// invocation that produced it. Either the whole artifact is returned or
/// generation fails; there is no partial output.
pub fn generate_dpi(
    registry: &BridgeRegistry,
    filename: &str,
    command: &str,
) -> Result<String, GenError> {
    let mut subs: FxHashMap<&str, String> = FxHashMap::default();
    subs.insert("filename", filename.to_string());
    subs.insert("command", command.to_string());
    subs.insert("dpi_prototypes", prototypes::gen_prototypes(registry));
    subs.insert("scope_registry", scope::gen_scope_registry());
    subs.insert("dpi_tf_impl", gen_tf_impls(registry));
    subs.insert("export_dispatch", dispatch::gen_export_dispatch(registry));
    subs.insert(
        "hpi_method_table_entries",
        exports::gen_method_table_entries(registry),
    );

    Template::new(boilerplate::DPI_TEMPLATE).substitute(&subs)
}

/// Implementation bodies, traversed in the prototype order: globals first,
/// then per component its registration entry point and owned callables.
fn gen_tf_impls(registry: &BridgeRegistry) -> String {
    let mut out = String::new();

    for tf in registry.globals() {
        match tf.direction {
            Direction::Import => out.push_str(&imports::gen_global_import_impl(tf)),
            Direction::Export => out.push_str(&exports::gen_export_entry(&tf.name, tf)),
        }
    }
    for comp in registry.components() {
        out.push_str(&imports::gen_register_impl(comp));
        for tf in &comp.callables {
            match tf.direction {
                Direction::Import => {
                    out.push_str(&imports::gen_component_import_impl(comp, tf));
                }
                Direction::Export => {
                    out.push_str(&exports::gen_export_entry(&comp.qualified_name(tf), tf));
                }
            }
        }
    }

    out
}
