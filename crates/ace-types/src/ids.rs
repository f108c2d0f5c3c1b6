//! Stable identifiers for reasons, operators, strategies, and context paths.
//!
//! Reasons are human-readable but part of the output contract: callers match on them.

// Reasons: single policy
pub const REASON_TARGET_MISMATCH: &str = "target mismatch";
pub const REASON_CONDITIONS_NOT_SATISFIED: &str = "conditions not satisfied";
pub const REASON_CONDITIONS_SATISFIED: &str = "conditions satisfied";

// Reasons: policy set
pub const REASON_NO_APPLICABLE_POLICIES: &str = "no applicable policies";
pub const REASON_DENY_OVERRIDES: &str = "deny overrides";
pub const REASON_ALLOW_NO_DENIES: &str = "allow (no denies matched)";

// Trace details
pub const DETAIL_TARGET_MISMATCH: &str = "target did not match request context";

// Operators
pub const OP_EQUALS: &str = "equals";
pub const OP_IN: &str = "in";
pub const OP_GT: &str = "gt";
pub const OP_LT: &str = "lt";

// Combination strategies
pub const STRATEGY_DENY_OVERRIDES: &str = "deny_overrides";

/// Namespaces a condition field may reference.
pub const FIELD_PREFIXES: &[&str] = &["user.", "resource.", "request."];

// Context paths read by target matching, for every policy.
pub const PATH_RESOURCE_TYPE: &str = "resource.type";
pub const PATH_ENVIRONMENT_ENV: &str = "environment.env";
