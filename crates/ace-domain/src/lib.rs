//! Pure policy evaluation (no IO).
//!
//! Input: structurally valid policies and a request context, constructed elsewhere.
//! Output: a decision with its trace, or a typed error.

#![forbid(unsafe_code)]

pub mod conditions;
pub mod config;
pub mod error;
pub mod operators;
pub mod resolve;
pub mod target;
pub mod validate;

mod engine;
mod policy_set;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use config::{EvaluationConfig, Strategy};
pub use engine::{Engine, combine, evaluate};
pub use error::{ContextValidationError, EngineError, InternalError, PolicyValidationError};
pub use operators::{OperatorDef, OperatorRegistry, Predicate, ValueShape};
pub use validate::{validate_policy, validate_policy_with};
