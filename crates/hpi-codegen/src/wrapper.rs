//! Companion wrapper tool: fixed per-component HDL wrapper lookup.
//!
//! No generation logic here. A component carries a table of fixed wrapper
//! sources keyed by kind; this selects one and renders it verbatim,
//! invoking the producer when one was registered instead of a literal.

use hpi_core::{GenError, WrapperKind};
use hpi_registry::BridgeRegistry;

pub fn gen_wrapper(
    registry: &BridgeRegistry,
    component: &str,
    kind: WrapperKind,
) -> Result<String, GenError> {
    let comp = registry
        .component(component)
        .ok_or_else(|| GenError::UnregisteredComponent {
            name: component.to_string(),
        })?;
    let source = comp
        .wrapper(kind)
        .ok_or_else(|| GenError::UnsupportedWrapperKind {
            component: component.to_string(),
            kind: kind.as_str().to_string(),
        })?;
    Ok(source.render())
}
