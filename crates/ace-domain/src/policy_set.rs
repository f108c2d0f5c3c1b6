//! Policy-set combination.

use crate::engine::Engine;
use crate::error::EngineError;
use ace_types::{Decision, Outcome, Policy, PolicyTrace, RequestContext, TraceEntry, ids};

/// Per-policy decisions in input order. The first error aborts.
pub(crate) fn decide_sequential(
    engine: &Engine,
    policies: &[Policy],
    context: &RequestContext,
) -> Result<Vec<Decision>, EngineError> {
    policies
        .iter()
        .map(|policy| engine.evaluate(policy, context))
        .collect()
}

/// Per-policy decisions computed on the rayon pool.
///
/// Results are gathered before any error is surfaced, so the error reported is the one with
/// the lowest input index, as in the sequential path.
#[cfg(feature = "parallel")]
pub(crate) fn decide_parallel(
    engine: &Engine,
    policies: &[Policy],
    context: &RequestContext,
) -> Result<Vec<Decision>, EngineError> {
    use rayon::prelude::*;

    let results: Vec<Result<Decision, EngineError>> = policies
        .par_iter()
        .map(|policy| engine.evaluate(policy, context))
        .collect();
    results.into_iter().collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn decide_parallel(
    engine: &Engine,
    policies: &[Policy],
    context: &RequestContext,
) -> Result<Vec<Decision>, EngineError> {
    decide_sequential(engine, policies, context)
}

/// Deny-overrides: first DENY by input order, else first ALLOW, else NOT_APPLICABLE.
///
/// The winner's trace is one `policy` summary per input policy followed by the winning
/// policy's own trace.
pub(crate) fn deny_overrides(mut decisions: Vec<Decision>) -> Decision {
    let summaries: Vec<TraceEntry> = decisions.iter().map(summary).collect();

    let winner = decisions
        .iter()
        .position(|d| d.outcome == Outcome::Deny)
        .or_else(|| decisions.iter().position(|d| d.outcome == Outcome::Allow));

    let Some(index) = winner else {
        return Decision {
            outcome: Outcome::NotApplicable,
            policy_id: None,
            reason: Some(ids::REASON_NO_APPLICABLE_POLICIES.to_string()),
            trace: summaries,
        };
    };

    let chosen = decisions.swap_remove(index);
    let reason = match chosen.outcome {
        Outcome::Deny => ids::REASON_DENY_OVERRIDES,
        _ => ids::REASON_ALLOW_NO_DENIES,
    };

    let mut trace = summaries;
    trace.extend(chosen.trace);

    Decision {
        outcome: chosen.outcome,
        policy_id: chosen.policy_id,
        reason: Some(reason.to_string()),
        trace,
    }
}

fn summary(decision: &Decision) -> TraceEntry {
    TraceEntry::Policy(PolicyTrace {
        ok: decision.outcome.is_applicable(),
        policy_id: decision.policy_id.clone().unwrap_or_default(),
        detail: decision.outcome,
    })
}
