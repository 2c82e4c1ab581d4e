//! Text-engine backends for TaskLens.
//!
//! All engines implement the `tasklens_core::TextEngine` trait. The
//! [`EngineRegistry`] memoizes construction by `(kind, model)` and hands out
//! shared handles; which backend it builds is decided once, from
//! configuration.

pub mod lexical;
pub mod registry;
pub mod remote;

pub use lexical::LexicalEngine;
pub use registry::EngineRegistry;
pub use remote::RemoteEngine;
