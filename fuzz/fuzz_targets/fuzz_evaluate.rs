//! Fuzz target for the validate-then-evaluate pipeline.
//!
//! Goal: Any policy that parses and passes semantic validation can be evaluated against any
//! context without panicking. Errors (missing fields) are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate
//! ```

#![no_main]

use ace_domain::{Engine, EvaluationConfig, Strategy};
use ace_types::{Outcome, Policy, RequestContext};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Structured input: free-form documents plus a few knobs for the policy set.
#[derive(Arbitrary, Debug)]
struct EvaluateInput {
    policies: Vec<String>,
    context: String,
    parallel: bool,
}

fuzz_target!(|input: EvaluateInput| {
    if input.policies.len() > 8 || input.context.len() > 4096 {
        return;
    }

    let Ok(context) = ace_loader::fuzz::parse_context_json(&input.context) else {
        return;
    };

    let engine = Engine::standard();
    let policies: Vec<Policy> = input
        .policies
        .iter()
        .filter(|p| p.len() <= 4096)
        .filter_map(|p| ace_loader::fuzz::parse_policy_json(p).ok())
        .filter(|p| engine.validate(p).is_ok())
        .collect();

    for policy in &policies {
        if let Ok(decision) = engine.evaluate(policy, &context) {
            assert_eq!(decision.policy_id.as_deref(), Some(policy.policy_id.as_str()));
        }
    }

    check_combination(&engine, &policies, &context, input.parallel);
});

fn check_combination(engine: &Engine, policies: &[Policy], context: &RequestContext, parallel: bool) {
    let config = EvaluationConfig {
        strategy: Strategy::DenyOverrides,
        parallel,
    };
    if let Ok(decision) = engine.combine_with(policies, context, &config) {
        if decision.outcome == Outcome::NotApplicable {
            assert!(decision.policy_id.is_none());
        }
        assert!(decision.trace.len() >= policies.len());
    }
}
