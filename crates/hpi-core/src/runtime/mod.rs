//! Runtime support model.
//!
//! The generated C carries its own scope registry; this module is the
//! Rust-side model of the same contract, used to pin down the behavior the
//! generator must emit and to give the fault classification a tested
//! consumer.

mod scope;

pub use scope::ScopeTable;
