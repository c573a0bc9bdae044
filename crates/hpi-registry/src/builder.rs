//! Explicit, deterministic registry construction.
//!
//! The builder assigns all numeric IDs at [`finish`](RegistryBuilder::finish)
//! time: component IDs dense in registration order, export-callable IDs
//! dense per component in declaration order. Those assignments are what the
//! dispatch table indexes, so nothing else may hand out IDs.

use hpi_core::{
    Binding, CallableDecl, ComponentType, Direction, GenError, ParamDecl, TypeTag, WrapperKind,
    WrapperSource,
};

/// Builder for a [`BridgeRegistry`](crate::BridgeRegistry).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    globals: Vec<CallableDecl>,
    components: Vec<PendingComponent>,
}

#[derive(Debug)]
struct PendingComponent {
    name: String,
    callables: Vec<CallableDecl>,
    wrappers: Vec<(WrapperKind, WrapperSource)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a global import callable hosted by an interpreter module.
    pub fn global_import(
        mut self,
        name: impl Into<String>,
        module: impl Into<String>,
        ret: Option<TypeTag>,
        params: impl IntoIterator<Item = ParamDecl>,
    ) -> Self {
        self.globals.push(CallableDecl {
            name: name.into(),
            ret,
            params: params.into_iter().collect(),
            direction: Direction::Import,
            binding: Binding::Module(module.into()),
            export_id: None,
        });
        self
    }

    /// Declare a global export callable, implemented natively.
    pub fn global_export(
        mut self,
        name: impl Into<String>,
        ret: Option<TypeTag>,
        params: impl IntoIterator<Item = ParamDecl>,
    ) -> Self {
        self.globals.push(CallableDecl {
            name: name.into(),
            ret,
            params: params.into_iter().collect(),
            direction: Direction::Export,
            binding: Binding::None,
            export_id: None,
        });
        self
    }

    /// Declare a component type and populate it through the closure.
    pub fn component(
        mut self,
        name: impl Into<String>,
        build: impl FnOnce(ComponentBuilder) -> ComponentBuilder,
    ) -> Self {
        let builder = build(ComponentBuilder {
            name: name.into(),
            callables: Vec::new(),
            wrappers: Vec::new(),
        });
        self.components.push(PendingComponent {
            name: builder.name,
            callables: builder.callables,
            wrappers: builder.wrappers,
        });
        self
    }

    /// Validate the declarations and assign all numeric IDs.
    pub fn finish(self) -> Result<crate::BridgeRegistry, GenError> {
        validate_callables("global scope", &self.globals)?;

        let mut components = Vec::with_capacity(self.components.len());
        for (index, pending) in self.components.into_iter().enumerate() {
            if pending.name.is_empty() {
                return Err(GenError::MissingField {
                    owner: "component type".into(),
                    field: "name".into(),
                });
            }
            if components
                .iter()
                .any(|c: &ComponentType| c.name == pending.name)
            {
                return Err(GenError::DuplicateComponent { name: pending.name });
            }
            validate_callables(&format!("component \"{}\"", pending.name), &pending.callables)?;

            let mut callables = pending.callables;
            let mut next_export_id = 0;
            for callable in &mut callables {
                if callable.is_export() {
                    callable.export_id = Some(next_export_id);
                    next_export_id += 1;
                }
            }

            components.push(ComponentType {
                name: pending.name,
                id: index as u32,
                callables,
                wrappers: pending.wrappers,
            });
        }

        Ok(crate::BridgeRegistry::new(self.globals, components))
    }
}

/// Scoped builder for one component type's callables and wrappers.
#[derive(Debug)]
pub struct ComponentBuilder {
    name: String,
    callables: Vec<CallableDecl>,
    wrappers: Vec<(WrapperKind, WrapperSource)>,
}

impl ComponentBuilder {
    /// Declare an import callable bound to an interpreter method.
    pub fn import(
        mut self,
        name: impl Into<String>,
        method: impl Into<String>,
        ret: Option<TypeTag>,
        params: impl IntoIterator<Item = ParamDecl>,
    ) -> Self {
        self.callables.push(CallableDecl {
            name: name.into(),
            ret,
            params: params.into_iter().collect(),
            direction: Direction::Import,
            binding: Binding::Method(method.into()),
            export_id: None,
        });
        self
    }

    /// Declare an export callable, implemented natively.
    pub fn export(
        mut self,
        name: impl Into<String>,
        ret: Option<TypeTag>,
        params: impl IntoIterator<Item = ParamDecl>,
    ) -> Self {
        self.callables.push(CallableDecl {
            name: name.into(),
            ret,
            params: params.into_iter().collect(),
            direction: Direction::Export,
            binding: Binding::None,
            export_id: None,
        });
        self
    }

    /// Attach a fixed wrapper for the companion tool.
    pub fn wrapper(mut self, kind: WrapperKind, source: WrapperSource) -> Self {
        self.wrappers.push((kind, source));
        self
    }
}

fn validate_callables(scope: &str, callables: &[CallableDecl]) -> Result<(), GenError> {
    for (i, callable) in callables.iter().enumerate() {
        if callable.name.is_empty() {
            return Err(GenError::MissingField {
                owner: format!("callable in {scope}"),
                field: "name".into(),
            });
        }
        if let Binding::Module(module) = &callable.binding
            && module.is_empty()
        {
            return Err(GenError::MissingField {
                owner: format!("callable \"{}\"", callable.name),
                field: "module".into(),
            });
        }
        if let Binding::Method(method) = &callable.binding
            && method.is_empty()
        {
            return Err(GenError::MissingField {
                owner: format!("callable \"{}\"", callable.name),
                field: "method".into(),
            });
        }
        if callables[..i].iter().any(|c| c.name == callable.name) {
            return Err(GenError::DuplicateCallable {
                scope: scope.into(),
                name: callable.name.clone(),
            });
        }
    }
    Ok(())
}
