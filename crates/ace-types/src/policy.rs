use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::fmt;

/// Outcome a policy yields when its target matches and its conditions hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "ALLOW",
            Effect::Deny => "DENY",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applicability predicate: exact match on resource type and environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Target {
    /// Type of the target resource (matched against `resource.type`).
    pub resource_type: String,
    /// Environment such as `prod` or `staging` (matched against `environment.env`).
    pub environment: String,
}

/// A single `field operator value` test.
///
/// Operator and field validity are not checked here; see the semantic validator in
/// `ace-domain`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    /// Dotted path into the request context (e.g. `user.role`).
    pub field: String,
    /// Symbolic operator name.
    pub operator: String,
    /// Comparison value (shape depends on the operator).
    #[serde(default)]
    pub value: JsonValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: JsonValue) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupMode {
    /// Every condition must hold.
    All,
    /// At least one condition must hold.
    Any,
}

impl GroupMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupMode::All => "all",
            GroupMode::Any => "any",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionGroupError {
    #[error("Only one of 'all' or 'any' may be defined")]
    BothDefined,
    #[error("One of 'all' or 'any' must be defined")]
    NeitherDefined,
    #[error("'{0}' must contain at least one condition")]
    Empty(&'static str),
}

/// A non-empty list of conditions combined with AND (`all`) or OR (`any`).
///
/// Only constructible through [`ConditionGroup::all`], [`ConditionGroup::any`], or
/// deserialization, all of which reject empty lists and documents that define both or
/// neither key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConditionGroupDoc", into = "ConditionGroupDoc")]
pub struct ConditionGroup {
    mode: GroupMode,
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn all(conditions: Vec<Condition>) -> Result<Self, ConditionGroupError> {
        Self::new(GroupMode::All, conditions)
    }

    pub fn any(conditions: Vec<Condition>) -> Result<Self, ConditionGroupError> {
        Self::new(GroupMode::Any, conditions)
    }

    pub fn new(mode: GroupMode, conditions: Vec<Condition>) -> Result<Self, ConditionGroupError> {
        if conditions.is_empty() {
            return Err(ConditionGroupError::Empty(mode.as_str()));
        }
        Ok(Self { mode, conditions })
    }

    pub fn mode(&self) -> GroupMode {
        self.mode
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Wire shape of a condition group: exactly one of `all` / `any`.
///
/// An empty list counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionGroupDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Condition>>,
}

impl TryFrom<ConditionGroupDoc> for ConditionGroup {
    type Error = ConditionGroupError;

    fn try_from(doc: ConditionGroupDoc) -> Result<Self, Self::Error> {
        let all = doc.all.filter(|c| !c.is_empty());
        let any = doc.any.filter(|c| !c.is_empty());
        match (all, any) {
            (Some(_), Some(_)) => Err(ConditionGroupError::BothDefined),
            (None, None) => Err(ConditionGroupError::NeitherDefined),
            (Some(all), None) => ConditionGroup::all(all),
            (None, Some(any)) => ConditionGroup::any(any),
        }
    }
}

impl From<ConditionGroup> for ConditionGroupDoc {
    fn from(group: ConditionGroup) -> Self {
        match group.mode {
            GroupMode::All => ConditionGroupDoc {
                all: Some(group.conditions),
                any: None,
            },
            GroupMode::Any => ConditionGroupDoc {
                all: None,
                any: Some(group.conditions),
            },
        }
    }
}

impl JsonSchema for ConditionGroup {
    fn schema_name() -> Cow<'static, str> {
        "ConditionGroup".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        ConditionGroupDoc::json_schema(generator)
    }
}

/// `ace.policy.v1` document, after structural validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Policy {
    /// Globally unique, versioned policy identifier.
    pub policy_id: String,
    /// Human-readable description of the policy intent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target: Target,
    pub conditions: ConditionGroup,
    pub effect: Effect,
}
