//! Semantic checks on a structurally valid policy.
//!
//! Context-independent: run once per policy at load time, before the policy is used.

use crate::error::PolicyValidationError;
use crate::operators::{OperatorRegistry, ValueShape};
use ace_types::{Condition, Policy, ids};
use serde_json::Value as JsonValue;

/// Validate against the standard operator set.
pub fn validate_policy(policy: &Policy) -> Result<(), PolicyValidationError> {
    validate_policy_with(policy, &OperatorRegistry::standard())
}

/// Validate every condition in declaration order; the first violation wins.
pub fn validate_policy_with(
    policy: &Policy,
    registry: &OperatorRegistry,
) -> Result<(), PolicyValidationError> {
    for condition in policy.conditions.conditions() {
        validate_condition(condition, registry)?;
    }
    Ok(())
}

fn validate_condition(
    condition: &Condition,
    registry: &OperatorRegistry,
) -> Result<(), PolicyValidationError> {
    let Some(op) = registry.get(&condition.operator) else {
        return Err(PolicyValidationError::UnsupportedOperator {
            operator: condition.operator.clone(),
        });
    };

    if !ids::FIELD_PREFIXES
        .iter()
        .any(|prefix| condition.field.starts_with(prefix))
    {
        return Err(PolicyValidationError::IllegalFieldPath {
            field: condition.field.clone(),
        });
    }

    match (op.shape(), &condition.value) {
        (ValueShape::List, JsonValue::Array(_)) => Ok(()),
        (ValueShape::List, _) => Err(PolicyValidationError::ExpectsList {
            operator: condition.operator.clone(),
        }),
        (ValueShape::Numeric, JsonValue::Number(_)) => Ok(()),
        (ValueShape::Numeric, _) => Err(PolicyValidationError::ExpectsNumeric {
            operator: condition.operator.clone(),
        }),
        (ValueShape::Any, _) => Ok(()),
    }
}
