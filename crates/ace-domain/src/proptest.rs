//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Target applicability dominating condition outcomes
//! - Deny-overrides winner selection against a simple model
//! - Operator totality over arbitrary JSON
//! - Parallel and sequential combination agreeing

use crate::config::{EvaluationConfig, Strategy as CombineStrategy};
use crate::engine::Engine;
use crate::operators::{self, OperatorRegistry};
use crate::resolve::resolve;
use ace_types::{
    Condition, ConditionGroup, Decision, Effect, GroupMode, Outcome, Policy, RequestContext,
    Target, TraceEntry,
};
use proptest::prelude::*;
use serde_json::{Value as JsonValue, json};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Arbitrary JSON up to a small depth.
fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-z]{0,6}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_effect() -> impl Strategy<Value = Effect> {
    prop_oneof![Just(Effect::Allow), Just(Effect::Deny)]
}

fn arb_mode() -> impl Strategy<Value = GroupMode> {
    prop_oneof![Just(GroupMode::All), Just(GroupMode::Any)]
}

fn arb_env() -> impl Strategy<Value = String> {
    prop_oneof![Just("prod".to_string()), Just("staging".to_string())]
}

/// Condition on `user.role` or `user.age`, always resolvable in `context()`.
fn arb_condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        prop_oneof![Just("admin"), Just("viewer"), Just("owner")]
            .prop_map(|role| Condition::new("user.role", "equals", json!(role))),
        prop::collection::vec(prop_oneof![Just("admin"), Just("viewer")], 0..3)
            .prop_map(|roles| Condition::new("user.role", "in", json!(roles))),
        (0i64..80).prop_map(|age| Condition::new("user.age", "gt", json!(age))),
        (0i64..80).prop_map(|age| Condition::new("user.age", "lt", json!(age))),
    ]
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    (
        "[a-z]{1,8}",
        arb_env(),
        arb_mode(),
        prop::collection::vec(arb_condition(), 1..5),
        arb_effect(),
    )
        .prop_map(|(id, environment, mode, conditions, effect)| Policy {
            policy_id: format!("p.{id}"),
            description: None,
            target: Target {
                resource_type: "document".to_string(),
                environment,
            },
            conditions: ConditionGroup::new(mode, conditions)
                .expect("generator yields at least one condition"),
            effect,
        })
}

fn context() -> RequestContext {
    RequestContext::try_from(json!({
        "user": { "role": "admin", "age": 40 },
        "resource": { "type": "document" },
        "environment": { "env": "prod" }
    }))
    .expect("object literal")
}

/// Reference model: first DENY, else first ALLOW, by index.
fn model_winner(decisions: &[Decision]) -> Option<usize> {
    let mut first_allow = None;
    for (i, d) in decisions.iter().enumerate() {
        match d.outcome {
            Outcome::Deny => return Some(i),
            Outcome::Allow if first_allow.is_none() => first_allow = Some(i),
            _ => {}
        }
    }
    first_allow
}

// ============================================================================
// Property tests: single-policy evaluation
// ============================================================================

proptest! {
    /// Off-target policies are NOT_APPLICABLE whatever their conditions say.
    #[test]
    fn target_mismatch_dominates(mut policy in arb_policy()) {
        policy.target.environment = "staging".to_string();
        let decision = Engine::standard().evaluate(&policy, &context()).unwrap();

        prop_assert_eq!(decision.outcome, Outcome::NotApplicable);
        prop_assert_eq!(decision.trace.len(), 1);
        prop_assert_eq!(decision.trace[0].kind(), "target");
        prop_assert!(!decision.trace[0].ok());
    }

    /// On-target policies: satisfied gives the effect, anything else gives DENY.
    #[test]
    fn on_target_outcome_follows_conditions(mut policy in arb_policy()) {
        policy.target.environment = "prod".to_string();
        let engine = Engine::standard();
        let decision = engine.evaluate(&policy, &context()).unwrap();

        let oks: Vec<bool> = decision.trace[1..].iter().map(TraceEntry::ok).collect();
        let satisfied = match policy.conditions.mode() {
            GroupMode::All => oks.iter().all(|ok| *ok),
            GroupMode::Any => oks.iter().any(|ok| *ok),
        };

        let expected = if satisfied { Outcome::from(policy.effect) } else { Outcome::Deny };
        prop_assert_eq!(decision.outcome, expected);
        prop_assert_eq!(decision.policy_id.as_deref(), Some(policy.policy_id.as_str()));
    }

    /// Matched trace is one target entry plus one entry per condition.
    #[test]
    fn matched_trace_covers_every_condition(mut policy in arb_policy()) {
        policy.target.environment = "prod".to_string();
        let decision = Engine::standard().evaluate(&policy, &context()).unwrap();

        prop_assert_eq!(decision.trace.len(), 1 + policy.conditions.conditions().len());
        prop_assert!(decision.trace[0].ok());
        prop_assert!(decision.trace[1..].iter().all(|t| t.kind() == "condition"));
    }
}

// ============================================================================
// Property tests: policy-set combination
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The combined winner agrees with the reference model.
    #[test]
    fn deny_overrides_matches_model(policies in prop::collection::vec(arb_policy(), 0..8)) {
        let engine = Engine::standard();
        let ctx = context();
        let decisions: Vec<Decision> = policies
            .iter()
            .map(|p| engine.evaluate(p, &ctx).unwrap())
            .collect();
        let combined = engine.combine(&policies, &ctx, CombineStrategy::DenyOverrides).unwrap();

        match model_winner(&decisions) {
            Some(i) => {
                prop_assert_eq!(combined.outcome, decisions[i].outcome);
                prop_assert_eq!(&combined.policy_id, &decisions[i].policy_id);
                prop_assert_eq!(
                    combined.trace.len(),
                    policies.len() + decisions[i].trace.len()
                );
            }
            None => {
                prop_assert_eq!(combined.outcome, Outcome::NotApplicable);
                prop_assert_eq!(combined.policy_id, None);
                prop_assert_eq!(combined.trace.len(), policies.len());
            }
        }
    }

    /// Parallel evaluation never changes the combined decision.
    #[test]
    fn parallel_equals_sequential(policies in prop::collection::vec(arb_policy(), 0..16)) {
        let engine = Engine::standard();
        let ctx = context();
        let sequential = engine.combine(&policies, &ctx, CombineStrategy::DenyOverrides).unwrap();
        let parallel = engine
            .combine_with(
                &policies,
                &ctx,
                &EvaluationConfig { strategy: CombineStrategy::DenyOverrides, parallel: true },
            )
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}

// ============================================================================
// Property tests: operators and resolution
// ============================================================================

proptest! {
    /// Every standard operator is total over arbitrary JSON.
    #[test]
    fn operators_never_panic(actual in arb_json(), expected in arb_json()) {
        let registry = OperatorRegistry::standard();
        for name in ["equals", "in", "gt", "lt"] {
            let _ = registry.apply(name, &actual, &expected).unwrap();
        }
    }

    /// equals is reflexive.
    #[test]
    fn equals_is_reflexive(value in arb_json()) {
        prop_assert!(operators::equals(&value, &value));
    }

    /// gt and lt never both hold.
    #[test]
    fn gt_and_lt_are_exclusive(a in arb_json(), b in arb_json()) {
        prop_assert!(!(operators::gt(&a, &b) && operators::lt(&a, &b)));
        prop_assert_eq!(operators::gt(&a, &b), operators::lt(&b, &a));
    }

    /// Integers compare numerically against floats.
    #[test]
    fn integer_float_comparison(n in -1000i64..1000) {
        prop_assert!(operators::equals(&json!(n), &json!(n as f64)));
        prop_assert!(operators::gt(&json!(n + 1), &json!(n as f64 + 0.5)));
    }

    /// Resolution of a present top-level key returns exactly that value.
    #[test]
    fn resolve_returns_present_values(key in "[a-z]{1,6}", value in arb_json()) {
        prop_assume!(!value.is_null());
        let mut map = serde_json::Map::new();
        map.insert(key.clone(), value.clone());
        let ctx = RequestContext::from(map);
        prop_assert_eq!(resolve(&key, &ctx).unwrap(), &value);
    }
}
