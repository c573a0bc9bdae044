//! Error types for generation and for the runtime model.
//!
//! The two halves have opposite policies. [`GenError`] is fatal: generation
//! aborts with a descriptive message and no output survives. [`RuntimeFault`]
//! classifies the conditions the generated runtime degrades on: each is
//! reported to a [`DiagnosticSink`](crate::DiagnosticSink) and the offending
//! call becomes a no-op with a neutral status, trading strict correctness
//! for simulator stability.

use thiserror::Error;

/// Fatal generation-time errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A type tag code outside the marshalling table.
    #[error("unknown type tag \"{code}\"")]
    UnknownTypeTag { code: String },

    /// A registry entity is missing a required field.
    #[error("{owner}: missing required field \"{field}\"")]
    MissingField { owner: String, field: String },

    /// Two component types share a name.
    #[error("duplicate component type \"{name}\"")]
    DuplicateComponent { name: String },

    /// Two callables share a name within the same scope.
    #[error("duplicate callable \"{name}\" in {scope}")]
    DuplicateCallable { scope: String, name: String },

    /// A component name the caller asked for is not in the registry.
    #[error("component \"{name}\" is not registered")]
    UnregisteredComponent { name: String },

    /// The component carries no wrapper of the requested kind.
    #[error("component \"{component}\" does not support wrapper kind \"{kind}\"")]
    UnsupportedWrapperKind { component: String, kind: String },

    /// A template placeholder was left without a substitution.
    #[error("template placeholder \"${{{name}}}\" has no substitution")]
    UnboundPlaceholder { name: String },

    /// A substitution was supplied for a placeholder that does not exist.
    #[error("substitution \"{name}\" matches no template placeholder")]
    UnusedSubstitution { name: String },

    /// A registry manifest failed to load or parse.
    #[error("failed to load registry manifest {path}: {detail}")]
    Manifest { path: String, detail: String },
}

/// Non-fatal fault classification for the generated runtime and its model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeFault {
    /// The bridge is wired up wrong (bad init order, missing module table).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A module, attribute, or scope handle failed to resolve.
    #[error("lookup failure: {0}")]
    LookupFailure(String),

    /// An argument tuple did not match its format string.
    #[error("marshal error: {0}")]
    MarshalError(String),

    /// A dispatch request named a (component, callable) pair with no entry.
    #[error("no dispatch entry for component ID {component}, callable ID {callable}")]
    DispatchMiss { component: u32, callable: u32 },
}
