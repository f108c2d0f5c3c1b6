//! Shared test utilities for the ace workspace.
//!
//! `xtask` uses `normalize_decision` at runtime when refreshing golden files, so this lives
//! in its own crate rather than behind `#[cfg(test)]`.

use serde_json::{Value, json};
use std::path::PathBuf;

/// A policy document that passes validation and allows `base_context()`.
pub fn valid_policy() -> Value {
    json!({
        "policy_id": "test.policy.v1",
        "description": "Admins may read production documents",
        "target": { "resource_type": "document", "environment": "prod" },
        "conditions": {
            "all": [
                { "field": "user.role", "operator": "equals", "value": "admin" }
            ]
        },
        "effect": "ALLOW"
    })
}

/// A request context matched by `valid_policy()`.
///
/// Deliberately carries no `user.clearance`, so conditions on it exercise the
/// missing-field path.
pub fn base_context() -> Value {
    json!({
        "user": { "id": "u-1", "role": "admin", "department": "engineering", "age": 34 },
        "resource": { "type": "document", "id": "doc-7", "owner": "u-1", "tags": ["internal"] },
        "request": { "action": "read", "ip": "10.0.0.8" },
        "environment": { "env": "prod" }
    })
}

/// Apply `edit` to a clone of `base`.
pub fn edited(base: &Value, edit: impl FnOnce(&mut Value)) -> Value {
    let mut doc = base.clone();
    edit(&mut doc);
    doc
}

/// `tests/fixtures` at the workspace root.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
}

/// Normalize a decision document for golden-file comparison.
///
/// Only the root `trace` is touched: `condition` entries whose `actual` is a float are
/// rounded to six decimals so platform formatting differences do not churn goldens.
pub fn normalize_decision(mut value: Value) -> Value {
    if let Some(trace) = value.get_mut("trace").and_then(Value::as_array_mut) {
        for entry in trace.iter_mut() {
            if entry.get("kind").and_then(Value::as_str) != Some("condition") {
                continue;
            }
            for key in ["actual", "expected"] {
                if let Some(slot) = entry.get_mut(key) {
                    round_floats(slot);
                }
            }
        }
    }
    value
}

fn round_floats(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(rounded) = n
                .as_f64()
                .map(|f| (f * 1e6).round() / 1e6)
                .and_then(serde_json::Number::from_f64)
            {
                *n = rounded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(round_floats),
        Value::Object(map) => map.values_mut().for_each(round_floats),
        _ => {}
    }
}
