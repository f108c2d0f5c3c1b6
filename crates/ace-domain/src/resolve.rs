//! Dotted-path lookup into the request context.

use crate::error::ContextValidationError;
use ace_types::RequestContext;
use serde_json::Value as JsonValue;

/// Resolve `path` (e.g. `user.role`) one segment at a time.
///
/// Absent and `null` values are both reported as missing: a typo'd field surfaces as an
/// error instead of quietly comparing against nothing.
pub fn resolve<'a>(
    path: &str,
    context: &'a RequestContext,
) -> Result<&'a JsonValue, ContextValidationError> {
    let mut map = context.as_map();
    let mut offset = 0usize;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = match map.get(segment) {
            Some(v) if !v.is_null() => v,
            _ => {
                return Err(ContextValidationError::MissingField {
                    path: path.to_string(),
                });
            }
        };

        if segments.peek().is_none() {
            return Ok(value);
        }

        offset += segment.len();
        match value {
            JsonValue::Object(inner) => map = inner,
            _ => {
                return Err(ContextValidationError::NotAMapping {
                    path: path.to_string(),
                    parent: path[..offset].to_string(),
                });
            }
        }
        // skip the '.'
        offset += 1;
    }

    // `split` always yields at least one segment.
    Err(ContextValidationError::MissingField {
        path: path.to_string(),
    })
}
