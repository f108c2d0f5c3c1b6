//! Stable DTOs and IDs used across the ace workspace.
//!
//! This crate is intentionally boring:
//! - the policy document model handed to the engine
//! - the request context wrapper
//! - the decision and trace documents the engine returns
//! - stable reason strings, operator names, and schema IDs

#![forbid(unsafe_code)]

pub mod context;
pub mod decision;
pub mod ids;
pub mod policy;

pub use context::{ContextNotAnObject, RequestContext};
pub use decision::{ConditionTrace, Decision, Outcome, PolicyTrace, TargetTrace, TraceEntry};
pub use policy::{
    Condition, ConditionGroup, ConditionGroupDoc, ConditionGroupError, Effect, GroupMode, Policy,
    Target,
};

/// Stable schema identifiers for ace documents.
pub const SCHEMA_POLICY_V1: &str = "ace.policy.v1";
pub const SCHEMA_DECISION_V1: &str = "ace.decision.v1";
pub const SCHEMA_CONTEXT_V1: &str = "ace.context.v1";
