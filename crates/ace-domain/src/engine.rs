use crate::conditions::evaluate_conditions_traced;
use crate::config::{EvaluationConfig, Strategy};
use crate::error::{EngineError, PolicyValidationError};
use crate::operators::OperatorRegistry;
use crate::policy_set;
use crate::target::target_matches;
use crate::validate::validate_policy_with;
use ace_types::{Decision, Outcome, Policy, RequestContext, TargetTrace, TraceEntry, ids};

/// Decision engine bound to one operator registry.
///
/// Holds no mutable state: a single engine may be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    registry: OperatorRegistry,
}

impl Engine {
    pub fn new(registry: OperatorRegistry) -> Self {
        Self { registry }
    }

    pub fn standard() -> Self {
        Self::new(OperatorRegistry::standard())
    }

    pub fn validate(&self, policy: &Policy) -> Result<(), PolicyValidationError> {
        validate_policy_with(policy, &self.registry)
    }

    /// Single-policy decision.
    ///
    /// 1. Target mismatch: `NOT_APPLICABLE` with a single failed `target` entry.
    /// 2. Otherwise a passed `target` entry, then one `condition` entry per condition.
    /// 3. Unsatisfied conditions: `DENY`. Satisfied: the policy's effect.
    pub fn evaluate(
        &self,
        policy: &Policy,
        context: &RequestContext,
    ) -> Result<Decision, EngineError> {
        let policy_id = Some(policy.policy_id.clone());

        if !target_matches(&policy.target, context)? {
            tracing::debug!(policy_id = %policy.policy_id, "target mismatch");
            return Ok(Decision {
                outcome: Outcome::NotApplicable,
                policy_id,
                reason: Some(ids::REASON_TARGET_MISMATCH.to_string()),
                trace: vec![TraceEntry::Target(TargetTrace {
                    ok: false,
                    detail: Some(ids::DETAIL_TARGET_MISMATCH.to_string()),
                })],
            });
        }

        let mut trace = vec![TraceEntry::Target(TargetTrace {
            ok: true,
            detail: None,
        })];

        let group = evaluate_conditions_traced(&policy.conditions, context, &self.registry)?;
        trace.extend(group.trace.into_iter().map(TraceEntry::Condition));

        let (outcome, reason) = if group.satisfied {
            (Outcome::from(policy.effect), ids::REASON_CONDITIONS_SATISFIED)
        } else {
            (Outcome::Deny, ids::REASON_CONDITIONS_NOT_SATISFIED)
        };

        tracing::debug!(
            policy_id = %policy.policy_id,
            outcome = %outcome,
            reason,
            "policy evaluated"
        );

        Ok(Decision {
            outcome,
            policy_id,
            reason: Some(reason.to_string()),
            trace,
        })
    }

    /// Combine `policies` with `strategy`, computing per-policy decisions sequentially.
    pub fn combine(
        &self,
        policies: &[Policy],
        context: &RequestContext,
        strategy: Strategy,
    ) -> Result<Decision, EngineError> {
        self.combine_with(
            policies,
            context,
            &EvaluationConfig {
                strategy,
                parallel: false,
            },
        )
    }

    pub fn combine_with(
        &self,
        policies: &[Policy],
        context: &RequestContext,
        config: &EvaluationConfig,
    ) -> Result<Decision, EngineError> {
        let decisions = if config.parallel {
            policy_set::decide_parallel(self, policies, context)?
        } else {
            policy_set::decide_sequential(self, policies, context)?
        };

        let decision = match config.strategy {
            Strategy::DenyOverrides => policy_set::deny_overrides(decisions),
        };

        tracing::debug!(
            policies = policies.len(),
            outcome = %decision.outcome,
            policy_id = decision.policy_id.as_deref().unwrap_or("-"),
            strategy = %config.strategy,
            "policy set evaluated"
        );

        Ok(decision)
    }
}

/// Evaluate one policy with the standard operators.
pub fn evaluate(policy: &Policy, context: &RequestContext) -> Result<Decision, EngineError> {
    Engine::standard().evaluate(policy, context)
}

/// Combine policies with the standard operators.
pub fn combine(
    policies: &[Policy],
    context: &RequestContext,
    strategy: Strategy,
) -> Result<Decision, EngineError> {
    Engine::standard().combine(policies, context, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextValidationError;
    use crate::test_support::{base_context, context_from, policy_from, valid_policy};
    use ace_types::{ConditionTrace, Effect};
    use serde_json::json;

    #[test]
    fn allows_when_condition_matches() {
        let decision = evaluate(&valid_policy(), &base_context()).unwrap();
        assert_eq!(decision.outcome, Outcome::Allow);
        assert_eq!(decision.policy_id.as_deref(), Some("test.policy.v1"));
        assert_eq!(decision.reason.as_deref(), Some("conditions satisfied"));
    }

    #[test]
    fn denies_when_condition_fails() {
        let ctx = context_from(|c| c["user"]["role"] = json!("viewer"));
        let decision = evaluate(&valid_policy(), &ctx).unwrap();
        assert_eq!(decision.outcome, Outcome::Deny);
        assert_eq!(decision.reason.as_deref(), Some("conditions not satisfied"));
    }

    #[test]
    fn deny_effect_with_failed_conditions_is_still_deny() {
        let policy = policy_from(|p| p["effect"] = json!("DENY"));
        let ctx = context_from(|c| c["user"]["role"] = json!("viewer"));
        assert_eq!(evaluate(&policy, &ctx).unwrap().outcome, Outcome::Deny);
    }

    #[test]
    fn target_mismatch_is_not_applicable() {
        let ctx = context_from(|c| c["resource"]["type"] = json!("image"));
        let decision = evaluate(&valid_policy(), &ctx).unwrap();
        assert_eq!(decision.outcome, Outcome::NotApplicable);
        assert_eq!(decision.reason.as_deref(), Some("target mismatch"));
        assert_eq!(decision.policy_id.as_deref(), Some("test.policy.v1"));
        assert_eq!(
            decision.trace,
            vec![TraceEntry::Target(TargetTrace {
                ok: false,
                detail: Some("target did not match request context".to_string()),
            })]
        );
    }

    #[test]
    fn target_mismatch_skips_condition_fields() {
        let ctx = context_from(|c| {
            c["environment"]["env"] = json!("staging");
            c["user"].as_object_mut().unwrap().remove("role");
        });
        assert_eq!(
            evaluate(&valid_policy(), &ctx).unwrap().outcome,
            Outcome::NotApplicable
        );
    }

    #[test]
    fn missing_condition_field_raises() {
        let ctx = context_from(|c| {
            c["user"].as_object_mut().unwrap().remove("role");
        });
        let err = evaluate(&valid_policy(), &ctx).unwrap_err();
        assert_eq!(
            err,
            EngineError::Context(ContextValidationError::MissingField {
                path: "user.role".to_string()
            })
        );
    }

    #[test]
    fn missing_resource_type_raises() {
        let ctx = context_from(|c| {
            c["resource"].as_object_mut().unwrap().remove("type");
        });
        assert!(matches!(
            evaluate(&valid_policy(), &ctx),
            Err(EngineError::Context(_))
        ));
    }

    #[test]
    fn in_operator_allows_when_value_in_list() {
        let policy = policy_from(|p| {
            p["conditions"]["all"][0] =
                json!({ "field": "user.role", "operator": "in", "value": ["admin", "owner"] });
        });
        assert_eq!(
            evaluate(&policy, &base_context()).unwrap().outcome,
            Outcome::Allow
        );
    }

    #[test]
    fn trace_lists_target_then_conditions_in_order() {
        let policy = policy_from(|p| {
            p["conditions"]["all"]
                .as_array_mut()
                .unwrap()
                .push(json!({ "field": "user.department", "operator": "equals", "value": "sales" }));
        });
        let decision = evaluate(&policy, &base_context()).unwrap();

        assert_eq!(decision.outcome, Outcome::Deny);
        let kinds: Vec<&str> = decision.trace.iter().map(TraceEntry::kind).collect();
        assert_eq!(kinds, vec!["target", "condition", "condition"]);
        assert_eq!(
            decision.trace[2],
            TraceEntry::Condition(ConditionTrace {
                ok: false,
                field: "user.department".to_string(),
                operator: "equals".to_string(),
                expected: json!("sales"),
                actual: json!("engineering"),
            })
        );
    }

    #[test]
    fn any_group_satisfied_yields_effect() {
        let policy = policy_from(|p| {
            p["effect"] = json!("DENY");
            p["conditions"] = json!({
                "any": [
                    { "field": "user.role", "operator": "equals", "value": "owner" },
                    { "field": "user.department", "operator": "equals", "value": "engineering" }
                ]
            });
        });
        let decision = evaluate(&policy, &base_context()).unwrap();
        assert_eq!(decision.outcome, Outcome::from(Effect::Deny));
        assert_eq!(decision.reason.as_deref(), Some("conditions satisfied"));
    }

    #[test]
    fn engine_uses_its_own_registry() {
        let registry = OperatorRegistry::empty().with_operator(
            "equals",
            crate::operators::ValueShape::Any,
            |_: &serde_json::Value, _: &serde_json::Value| false,
        );
        let engine = Engine::new(registry);
        let decision = engine.evaluate(&valid_policy(), &base_context()).unwrap();
        assert_eq!(decision.outcome, Outcome::Deny);
    }

    #[test]
    fn engine_validate_uses_registry() {
        let engine = Engine::new(OperatorRegistry::empty());
        assert!(matches!(
            engine.validate(&valid_policy()),
            Err(PolicyValidationError::UnsupportedOperator { .. })
        ));
    }
}
