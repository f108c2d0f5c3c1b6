use crate::error::ContextValidationError;
use crate::resolve::resolve;
use ace_types::{RequestContext, Target, ids};

/// Whether `target` applies to `context`.
///
/// `resource.type` and `environment.env` are required of every context: their absence is a
/// caller error, not a silent non-match. Present values are compared by exact string equality;
/// non-string values never match.
pub fn target_matches(
    target: &Target,
    context: &RequestContext,
) -> Result<bool, ContextValidationError> {
    let resource_type = resolve(ids::PATH_RESOURCE_TYPE, context)?;
    let environment = resolve(ids::PATH_ENVIRONMENT_ENV, context)?;

    Ok(resource_type.as_str() == Some(target.resource_type.as_str())
        && environment.as_str() == Some(target.environment.as_str()))
}
