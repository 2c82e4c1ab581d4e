//! Decision and extraction layer for TaskLens.
//!
//! Turns raw semantic signals (confidence scores and generated text from a
//! [`tasklens_core::TextEngine`]) into structured, reproducible
//! task-management decisions:
//!
//! - [`priority`] — weighted multi-factor priority scoring
//! - [`category`] — dual-signal Eisenhower-style categorization
//! - [`extract`] — structured field and date-token extraction
//! - [`summarize`] — summary text plus keyword selection
//! - [`suggest`] — next-task context formatting and suggestion parsing
//! - [`orchestrator`] — per-request validation, sequencing, and the uniform
//!   error boundary
//!
//! Every module is deterministic given the engine's outputs; all engine
//! calls are issued strictly sequentially.

pub mod category;
pub mod extract;
pub mod orchestrator;
pub mod priority;
pub mod suggest;
pub mod summarize;

pub use orchestrator::{Analyzer, Operation};

#[cfg(test)]
pub(crate) mod test_helpers;
