//! Declaration registry for the HPI bridge generator.
//!
//! [`BridgeRegistry`] is the single authoritative declaration list every
//! generator traverses. It is built once, before generation starts, by an
//! explicit deterministic step: either the [`RegistryBuilder`] API or the
//! [`manifest`] loader. Generation itself has no dependency on dynamic
//! module loading, so synthetic registries drop straight into tests.

pub mod builder;
pub mod manifest;
mod registry;

pub use builder::{ComponentBuilder, RegistryBuilder};
pub use registry::BridgeRegistry;
