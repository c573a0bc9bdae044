//! Prototype emission: one native declaration per callable.
//!
//! Emission order (globals first, then each component in registry order)
//! is the synchronization contract every other generator traverses in. A
//! component-owned import callable gains an implicit leading `int id`
//! identifying the scope handle to reinstate; export callables and global
//! imports never do.

use hpi_core::CallableDecl;
use hpi_registry::BridgeRegistry;

use crate::sig::{param_list, param_list_with_id, ret_prefix};
use crate::source::SourceWriter;

pub fn gen_prototypes(registry: &BridgeRegistry) -> String {
    let mut w = SourceWriter::new();

    for tf in registry.globals() {
        w.line(prototype(&tf.name, tf, false));
    }
    for comp in registry.components() {
        w.line(register_prototype(&comp.name));
        for tf in &comp.callables {
            w.line(prototype(&comp.qualified_name(tf), tf, tf.is_import()));
        }
    }

    w.finish()
}

/// Registration-function prototype for a component type.
fn register_prototype(component: &str) -> String {
    format!("int {component}_register(const char *iname);")
}

fn prototype(qname: &str, tf: &CallableDecl, implicit_id: bool) -> String {
    let params = if implicit_id {
        param_list_with_id(&tf.params)
    } else {
        param_list(&tf.params)
    };
    format!("{}{qname}({params});", ret_prefix(tf.ret))
}
