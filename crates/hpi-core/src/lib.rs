//! Core data model for the HPI bridge generator.
//!
//! This crate holds everything the generators and the runtime model share:
//! the scalar type tags and their native marshalling table, the declaration
//! model (parameters, callables, component types), the typed error
//! hierarchy, the diagnostic sink, and the scope-table runtime model.

pub mod decl;
pub mod diagnostics;
pub mod error;
pub mod runtime;
pub mod tags;

pub use decl::{
    Binding, CallableDecl, ComponentType, Direction, ParamDecl, ScopeHandle, WrapperKind,
    WrapperSource,
};
pub use diagnostics::{DiagnosticSink, Diagnostics, StderrSink};
pub use error::{GenError, RuntimeFault};
pub use runtime::ScopeTable;
pub use tags::TypeTag;
