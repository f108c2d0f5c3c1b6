use ace_types::{Policy, RequestContext};
use anyhow::Context;
use serde_json::Value as JsonValue;

/// Source format of a policy document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyFormat {
    Json,
    Yaml,
}

impl PolicyFormat {
    /// Format for a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(PolicyFormat::Json),
            "yaml" | "yml" => Some(PolicyFormat::Yaml),
            _ => None,
        }
    }
}

pub fn parse_policy(text: &str, format: PolicyFormat) -> anyhow::Result<Policy> {
    match format {
        PolicyFormat::Json => parse_policy_json(text),
        PolicyFormat::Yaml => parse_policy_yaml(text),
    }
}

/// Structural validation happens here: unknown effects, missing keys and malformed condition
/// groups are all serde errors.
pub fn parse_policy_json(text: &str) -> anyhow::Result<Policy> {
    serde_json::from_str(text).context("parse policy JSON")
}

pub fn parse_policy_yaml(text: &str) -> anyhow::Result<Policy> {
    serde_yaml::from_str(text).context("parse policy YAML")
}

pub fn parse_context_json(text: &str) -> anyhow::Result<RequestContext> {
    let value: JsonValue = serde_json::from_str(text).context("parse context JSON")?;
    Ok(RequestContext::try_from(value)?)
}
