//! Code generation for the HPI bridge.
//!
//! Turns a [`BridgeRegistry`](hpi_registry::BridgeRegistry) into one C
//! source artifact exposing simulator tasks to the interpreter and
//! interpreter components to the simulator. Three independently emitted
//! pieces (prototypes, marshalling bodies, and the dispatch table) are
//! all derived from the registry's single traversal order, which is the
//! invariant that keeps numeric-ID dispatch routed to the right native
//! function.
//!
//! Generation is synchronous and side-effect free: every generator renders
//! to a `String`, and [`generate_dpi`] either produces the complete
//! artifact or fails with a [`GenError`](hpi_core::GenError). Callers write
//! the file only on success, so no partial artifact ever lands on disk.

pub mod boilerplate;
pub mod dispatch;
pub mod exports;
pub mod imports;
pub mod launcher;
pub mod prototypes;
pub mod scope;
mod sig;
pub mod source;
pub mod template;
pub mod wrapper;

mod generate;

pub use dispatch::DispatchTable;
pub use generate::generate_dpi;
pub use source::SourceWriter;
pub use template::Template;
pub use wrapper::gen_wrapper;

/// Default name of the generated bridge artifact.
pub const DEFAULT_OUTPUT: &str = "pyhpi_dpi.c";
