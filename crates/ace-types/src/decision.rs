use crate::policy::Effect;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Final outcome of an evaluation. `NotApplicable` is a decision, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Allow,
    Deny,
    NotApplicable,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Allow => "ALLOW",
            Outcome::Deny => "DENY",
            Outcome::NotApplicable => "NOT_APPLICABLE",
        }
    }

    pub fn is_applicable(self) -> bool {
        self != Outcome::NotApplicable
    }
}

impl From<Effect> for Outcome {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Allow => Outcome::Allow,
            Effect::Deny => Outcome::Deny,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ace.decision.v1` document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    #[serde(rename = "decision")]
    pub outcome: Outcome,

    /// Set when a specific policy determined the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Evaluation steps in the order they were taken.
    #[serde(default)]
    pub trace: Vec<TraceEntry>,
}

/// One evaluation step. The `kind` tag selects which fields are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TraceEntry {
    Target(TargetTrace),
    Condition(ConditionTrace),
    Policy(PolicyTrace),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetTrace {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionTrace {
    pub ok: bool,
    pub field: String,
    pub operator: String,
    pub expected: JsonValue,
    pub actual: JsonValue,
}

/// Per-policy summary emitted by the policy-set combinator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyTrace {
    pub ok: bool,
    pub policy_id: String,
    pub detail: Outcome,
}

impl TraceEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            TraceEntry::Target(_) => "target",
            TraceEntry::Condition(_) => "condition",
            TraceEntry::Policy(_) => "policy",
        }
    }

    pub fn ok(&self) -> bool {
        match self {
            TraceEntry::Target(t) => t.ok,
            TraceEntry::Condition(c) => c.ok,
            TraceEntry::Policy(p) => p.ok,
        }
    }

    /// One-line human summary of the step, if it has anything beyond `ok`.
    pub fn detail(&self) -> Option<String> {
        match self {
            TraceEntry::Target(t) => t.detail.clone(),
            TraceEntry::Condition(c) => Some(format!(
                "{} {} {} (actual {})",
                c.field, c.operator, c.expected, c.actual
            )),
            TraceEntry::Policy(p) => Some(format!("{} {}", p.policy_id, p.detail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decision_serializes_with_wire_names() {
        let decision = Decision {
            outcome: Outcome::NotApplicable,
            policy_id: None,
            reason: Some("no applicable policies".to_string()),
            trace: vec![TraceEntry::Policy(PolicyTrace {
                ok: false,
                policy_id: "p1".to_string(),
                detail: Outcome::NotApplicable,
            })],
        };

        let value = serde_json::to_value(&decision).unwrap();
        assert_eq!(
            value,
            json!({
                "decision": "NOT_APPLICABLE",
                "reason": "no applicable policies",
                "trace": [
                    { "kind": "policy", "ok": false, "policy_id": "p1", "detail": "NOT_APPLICABLE" }
                ]
            })
        );
    }

    #[test]
    fn condition_entry_carries_expected_and_actual() {
        let entry = TraceEntry::Condition(ConditionTrace {
            ok: false,
            field: "user.role".to_string(),
            operator: "equals".to_string(),
            expected: json!("admin"),
            actual: json!("viewer"),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "condition");
        assert_eq!(value["expected"], "admin");
        assert_eq!(value["actual"], "viewer");
        assert_eq!(
            entry.detail().as_deref(),
            Some(r#"user.role equals "admin" (actual "viewer")"#)
        );
    }

    #[test]
    fn trace_entry_round_trips_through_tag() {
        let json = json!({ "kind": "target", "ok": true });
        let entry: TraceEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry, TraceEntry::Target(TargetTrace { ok: true, detail: None }));
        assert_eq!(entry.kind(), "target");
        assert!(entry.ok());
    }

    #[test]
    fn effect_maps_to_outcome() {
        assert_eq!(Outcome::from(Effect::Deny), Outcome::Deny);
        assert_eq!(Outcome::from(Effect::Allow).to_string(), "ALLOW");
        assert!(!Outcome::NotApplicable.is_applicable());
    }
}
