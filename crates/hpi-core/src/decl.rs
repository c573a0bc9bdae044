//! Declaration model for bridged callables and component types.
//!
//! The registry hands these to every generator in one authoritative order:
//! global callables first, then each component type in registration order,
//! each owning its callables in declaration order. Prototype emission,
//! marshalling bodies, and dispatch rows are all derived from the same
//! traversal, which is what keeps them index-for-index consistent.

use std::fmt;

use serde::Deserialize;

use crate::tags::TypeTag;

/// A single declared parameter.
///
/// The ordinal position is the index in the owning callable's parameter
/// vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub tag: TypeTag,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }
}

/// Which side implements a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Invoked by the simulator, implemented in the interpreter.
    Import,
    /// Invoked by the interpreter, implemented natively.
    Export,
}

/// Interpreter-side resolution info for a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Global import: the interpreter module hosting the function.
    Module(String),
    /// Component import: the method name invoked on the live instance.
    Method(String),
    /// Exports resolve natively; nothing to look up on the interpreter side.
    None,
}

/// A declared task or function crossing the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDecl {
    /// Simple name. Component-owned callables are qualified with the
    /// component name when emitted as native symbols.
    pub name: String,
    /// Return type tag; `None` means no value is produced.
    pub ret: Option<TypeTag>,
    /// Declared parameters, in order.
    pub params: Vec<ParamDecl>,
    pub direction: Direction,
    pub binding: Binding,
    /// Dense per-component ID, assigned by the registry builder to export
    /// callables owned by a component. `None` everywhere else.
    pub export_id: Option<u32>,
}

impl CallableDecl {
    pub fn is_import(&self) -> bool {
        self.direction == Direction::Import
    }

    pub fn is_export(&self) -> bool {
        self.direction == Direction::Export
    }
}

/// Kind of fixed HDL wrapper a component can carry for the companion tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum WrapperKind {
    #[serde(rename = "sv-dpi")]
    SvDpi,
    #[serde(rename = "vl-vpi")]
    VlVpi,
}

impl WrapperKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            WrapperKind::SvDpi => "sv-dpi",
            WrapperKind::VlVpi => "vl-vpi",
        }
    }

    /// Default output file name for a wrapper of this kind.
    pub fn default_output(self, component: &str) -> String {
        match self {
            WrapperKind::SvDpi => format!("{component}.sv"),
            WrapperKind::VlVpi => format!("{component}.v"),
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source of a fixed wrapper: a literal string or a zero-argument producer.
#[derive(Debug, Clone)]
pub enum WrapperSource {
    Literal(String),
    Producer(fn() -> String),
}

impl WrapperSource {
    pub fn render(&self) -> String {
        match self {
            WrapperSource::Literal(text) => text.clone(),
            WrapperSource::Producer(f) => f(),
        }
    }
}

/// A verification component type and its owned callables.
#[derive(Debug, Clone)]
pub struct ComponentType {
    pub name: String,
    /// Dense ID assigned in registration order; the outer dispatch key.
    pub id: u32,
    /// Owned callables, in declaration order.
    pub callables: Vec<CallableDecl>,
    /// Fixed wrappers for the companion tool, keyed by kind.
    pub wrappers: Vec<(WrapperKind, WrapperSource)>,
}

impl ComponentType {
    /// Fully qualified native symbol name for an owned callable.
    pub fn qualified_name(&self, callable: &CallableDecl) -> String {
        format!("{}_{}", self.name, callable.name)
    }

    /// Export callables in declaration order; index equals export ID.
    pub fn exports(&self) -> impl Iterator<Item = &CallableDecl> {
        self.callables.iter().filter(|c| c.is_export())
    }

    pub fn wrapper(&self, kind: WrapperKind) -> Option<&WrapperSource> {
        self.wrappers
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, source)| source)
    }
}

/// Dense handle identifying a registered execution scope.
///
/// Handles are permanent: never invalidated, never reused, never reassigned
/// to a different context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeHandle(pub u32);

impl ScopeHandle {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
