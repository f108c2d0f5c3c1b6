use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Runtime request context: an arbitrary string-keyed JSON object.
///
/// By convention it carries `user`, `resource`, and `environment` mappings (and optionally
/// `request`). Their presence is not checked on construction: the engine fails fast with a
/// context error when a path it needs is missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RequestContext(Map<String, JsonValue>);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("request context must be a JSON object, got {0}")]
pub struct ContextNotAnObject(pub &'static str);

impl RequestContext {
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }
}

impl From<Map<String, JsonValue>> for RequestContext {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<JsonValue> for RequestContext {
    type Error = ContextNotAnObject;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Err(ContextNotAnObject("null")),
            JsonValue::Bool(_) => Err(ContextNotAnObject("a boolean")),
            JsonValue::Number(_) => Err(ContextNotAnObject("a number")),
            JsonValue::String(_) => Err(ContextNotAnObject("a string")),
            JsonValue::Array(_) => Err(ContextNotAnObject("an array")),
        }
    }
}
