//! Use case orchestration for ace.
//!
//! This crate provides the application layer: use cases that coordinate the loader, settings,
//! domain, and render layers. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod evaluate;
mod render;
mod validate;

pub use evaluate::{
    EvaluateInput, EvaluateOutput, decision_exit_code, run_evaluate, run_evaluate_policies,
};
pub use render::{render_decision, serialize_decision};
pub use validate::{FileValidation, ValidateOutput, run_validate};
