//! The authoritative declaration registry.

use rustc_hash::FxHashMap;

use hpi_core::{CallableDecl, ComponentType};

/// Ordered global callables plus named component types.
///
/// Iteration order is the synchronization contract between the generators:
/// globals in declaration order first, then components in registration
/// order, each owning its callables in declaration order. Prototypes,
/// marshalling bodies, and dispatch rows must all be derived from this one
/// order or calls misroute silently.
///
/// A registry is immutable once built; construct one through
/// [`RegistryBuilder`](crate::RegistryBuilder) or the
/// [`manifest`](crate::manifest) loader.
#[derive(Debug, Default)]
pub struct BridgeRegistry {
    globals: Vec<CallableDecl>,
    components: Vec<ComponentType>,
    component_index: FxHashMap<String, usize>,
}

impl BridgeRegistry {
    pub(crate) fn new(globals: Vec<CallableDecl>, components: Vec<ComponentType>) -> Self {
        let component_index = components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            globals,
            components,
            component_index,
        }
    }

    /// Global callables, in declaration order.
    pub fn globals(&self) -> &[CallableDecl] {
        &self.globals
    }

    /// Component types, in registration order; index equals component ID.
    pub fn components(&self) -> &[ComponentType] {
        &self.components
    }

    /// Look up a component type by name.
    pub fn component(&self, name: &str) -> Option<&ComponentType> {
        self.component_index
            .get(name)
            .map(|&i| &self.components[i])
    }

    /// True when the registry declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.components.is_empty()
    }
}
