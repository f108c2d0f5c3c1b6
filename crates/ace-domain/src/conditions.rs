//! Condition group evaluation.
//!
//! Every condition is evaluated, even once the aggregate is decided, so the trace always
//! covers the whole group. Only the aggregate short-circuits.

use crate::error::EngineError;
use crate::operators::OperatorRegistry;
use crate::resolve::resolve;
use ace_types::{ConditionGroup, ConditionTrace, GroupMode, RequestContext};

#[derive(Clone, Debug, PartialEq)]
pub struct GroupOutcome {
    pub satisfied: bool,
    /// One entry per condition, in declaration order.
    pub trace: Vec<ConditionTrace>,
}

pub fn evaluate_conditions(
    group: &ConditionGroup,
    context: &RequestContext,
    registry: &OperatorRegistry,
) -> Result<bool, EngineError> {
    evaluate_conditions_traced(group, context, registry).map(|o| o.satisfied)
}

/// Evaluate `group`, recording one trace entry per condition.
///
/// A missing field or an unregistered operator aborts the evaluation; no partial trace is
/// returned.
pub fn evaluate_conditions_traced(
    group: &ConditionGroup,
    context: &RequestContext,
    registry: &OperatorRegistry,
) -> Result<GroupOutcome, EngineError> {
    let mut trace = Vec::with_capacity(group.conditions().len());

    for condition in group.conditions() {
        let actual = resolve(&condition.field, context)?;
        let ok = registry.apply(&condition.operator, actual, &condition.value)?;

        tracing::trace!(
            field = %condition.field,
            operator = %condition.operator,
            ok,
            "condition evaluated"
        );

        trace.push(ConditionTrace {
            ok,
            field: condition.field.clone(),
            operator: condition.operator.clone(),
            expected: condition.value.clone(),
            actual: actual.clone(),
        });
    }

    let satisfied = match group.mode() {
        GroupMode::All => trace.iter().all(|t| t.ok),
        GroupMode::Any => trace.iter().any(|t| t.ok),
    };

    Ok(GroupOutcome { satisfied, trace })
}
