use ace_types::{Condition, Policy, RequestContext};
use serde_json::Value as JsonValue;

pub fn valid_policy() -> Policy {
    policy_from(|_| {})
}

/// Parse `ace_test_util::valid_policy()` after applying `edit` to the raw document.
pub fn policy_from(edit: impl FnOnce(&mut JsonValue)) -> Policy {
    let doc = ace_test_util::edited(&ace_test_util::valid_policy(), edit);
    serde_json::from_value(doc).expect("policy fixture must deserialize")
}

pub fn base_context() -> RequestContext {
    context_from(|_| {})
}

pub fn context_from(edit: impl FnOnce(&mut JsonValue)) -> RequestContext {
    let doc = ace_test_util::edited(&ace_test_util::base_context(), edit);
    RequestContext::try_from(doc).expect("context fixture must be an object")
}

pub fn condition(field: &str, operator: &str, value: JsonValue) -> Condition {
    Condition::new(field, operator, value)
}
